use std::fmt;
use std::path::Path;

use prost::Message;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use crate::api::{DeviceProfile, ServiceProfile};
use crate::error::{Error, Result};
use crate::wire::UnknownFields;

/// Representations a profile can be read from or written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Format {
    /// Protobuf binary wire format.
    Binary,
    /// JSON with snake_case keys.
    Json,
    /// Compact protobuf text format (write only).
    Text,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Binary => f.write_str("binary"),
            Format::Json => f.write_str("json"),
            Format::Text => f.write_str("text"),
        }
    }
}

/// A profile message that can travel in every [`Format`].
pub trait Profile:
    Message + Default + Serialize + DeserializeOwned + fmt::Display + Sized
{
    const KIND: &'static str;

    fn unknown_fields(&self) -> &UnknownFields;

    /// Feature toggles derived from the fields, for display.
    fn features(&self) -> Vec<(&'static str, String)>;
}

impl Profile for ServiceProfile {
    const KIND: &'static str = "service-profile";

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown_fields
    }

    fn features(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ul_rate_policy", self.ul_rate_policy().to_string()),
            ("dl_rate_policy", self.dl_rate_policy().to_string()),
            ("roaming_allowed", self.roaming_allowed().to_string()),
            ("min_gw_diversity", self.min_gw_diversity_enabled().to_string()),
            ("nwk_geo_loc", self.nwk_geo_loc.to_string()),
        ]
    }
}

impl Profile for DeviceProfile {
    const KIND: &'static str = "device-profile";

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown_fields
    }

    fn features(&self) -> Vec<(&'static str, String)> {
        vec![
            ("activation", self.activation_mode().to_string()),
            ("class_b", self.supports_class_b.to_string()),
            ("class_c", self.supports_class_c.to_string()),
            ("payload_codec", self.payload_codec_enabled().to_string()),
            ("geoloc_buffering", self.geoloc_buffering_enabled().to_string()),
            ("geoloc_min_buffer", self.geoloc_min_buffer_enabled().to_string()),
        ]
    }
}

pub fn decode<T: Profile>(format: Format, bytes: &[u8]) -> Result<T> {
    let profile = match format {
        Format::Binary => T::decode(bytes)?,
        Format::Json => serde_json::from_slice(bytes)?,
        Format::Text => return Err(Error::UnsupportedFormat(format)),
    };
    debug!(kind = T::KIND, %format, unknown = profile.unknown_fields().len(), "decoded");
    Ok(profile)
}

/// Replaces `target` with the decoded profile. On error `target` is left as it was.
pub fn decode_into<T: Profile>(target: &mut T, format: Format, bytes: &[u8]) -> Result<()> {
    *target = decode(format, bytes)?;
    Ok(())
}

pub fn encode<T: Profile>(format: Format, profile: &T) -> Result<Vec<u8>> {
    Ok(match format {
        Format::Binary => profile.encode_to_vec(),
        Format::Json => serde_json::to_vec_pretty(profile)?,
        Format::Text => profile.to_string().into_bytes(),
    })
}

pub async fn load<T: Profile>(path: &Path, format: Format) -> Result<T> {
    let bytes = tokio::fs::read(path).await?;
    info!(kind = T::KIND, path = %path.display(), len = bytes.len(), "loaded");
    decode(format, &bytes)
}

pub async fn store<T: Profile>(path: &Path, format: Format, profile: &T) -> Result<()> {
    let bytes = encode(format, profile)?;
    tokio::fs::write(path, &bytes).await?;
    info!(kind = T::KIND, path = %path.display(), len = bytes.len(), "stored");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::api::RatePolicy;
    use pretty_assertions::assert_eq;

    fn gold() -> ServiceProfile {
        ServiceProfile {
            id: "0b6a4d0e-3f0c-4a3c-9d4c-2f6f3f7f1a11".into(),
            name: "gold".into(),
            organization_id: 1,
            network_server_id: 1,
            ul_rate: 3600,
            ul_bucket_size: 10,
            ul_rate_policy: RatePolicy::Mark as i32,
            dr_min: 0,
            dr_max: 5,
            pr_allowed: true,
            ..Default::default()
        }
    }

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lorawan_profiles_{}_{}", std::process::id(), name))
    }

    #[test]
    fn truncated_binary_leaves_target_untouched() {
        let mut target = gold();
        let bytes = gold().encode_to_vec();
        let result = decode_into(&mut target, Format::Binary, &bytes[..bytes.len() - 2]);
        assert!(matches!(result, Err(Error::Decode(_))));
        assert_eq!(target, gold());
    }

    #[test]
    fn bad_json_leaves_target_untouched() {
        let mut target = gold();
        let result = decode_into(&mut target, Format::Json, br#"{"ul_rate": "fast"}"#);
        assert!(matches!(result, Err(Error::Json(_))));
        assert_eq!(target, gold());
    }

    #[test]
    fn decode_into_replaces_on_success() {
        let mut target = gold();
        decode_into(&mut target, Format::Binary, &[]).unwrap();
        assert_eq!(target, ServiceProfile::default());
    }

    #[test]
    fn text_is_write_only() {
        let text = encode(Format::Text, &gold()).unwrap();
        assert!(String::from_utf8(text).unwrap().starts_with("id:\"0b6a4d0e"));
        assert!(matches!(
            decode::<ServiceProfile>(Format::Text, b"id:\"x\""),
            Err(Error::UnsupportedFormat(Format::Text))
        ));
    }

    #[test]
    fn json_and_binary_agree() {
        let json = encode(Format::Json, &gold()).unwrap();
        let from_json: ServiceProfile = decode(Format::Json, &json).unwrap();
        let binary = encode(Format::Binary, &from_json).unwrap();
        assert_eq!(decode::<ServiceProfile>(Format::Binary, &binary).unwrap(), gold());
    }

    #[test]
    fn device_features_follow_sentinels() {
        let profile = DeviceProfile {
            supports_join: true,
            payload_codec: "CAYENNE_LPP".into(),
            ..Default::default()
        };
        let features = profile.features();
        assert!(features.contains(&("activation", "OTAA".to_string())));
        assert!(features.contains(&("payload_codec", "true".to_string())));
        assert!(features.contains(&("geoloc_buffering", "false".to_string())));
    }

    #[tokio::test]
    async fn store_then_load_keeps_unknown_fields() {
        let mut bytes = DeviceProfile {
            name: "abp-eu868".into(),
            factory_preset_freqs: vec![868_100_000, 868_300_000, 868_500_000],
            ..Default::default()
        }
        .encode_to_vec();
        bytes.extend_from_slice(&[0x98, 0x06, 0x2a]);
        let profile: DeviceProfile = decode(Format::Binary, &bytes).unwrap();

        let path = scratch("device.bin");
        store(&path, Format::Binary, &profile).await.unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), bytes);

        let loaded: DeviceProfile = load(&path, Format::Binary).await.unwrap();
        assert_eq!(loaded, profile);
        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn load_missing_file_is_io_error() {
        let result = load::<ServiceProfile>(&scratch("missing.json"), Format::Json).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
