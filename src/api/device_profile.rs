use std::fmt;

use lazy_static::lazy_static;
use prost::bytes::{Buf, BufMut};
use prost::encoding::{self, DecodeContext, WireType};
use prost::DecodeError;
use serde::{Deserialize, Serialize};

use crate::text::TextWriter;
use crate::wire::{self, Preserving, UnknownFields};

const STRUCT_NAME: &str = "DeviceProfile";

lazy_static! {
    static ref EMPTY: DeviceProfile = DeviceProfile::default();
}

/// How an end-device obtains its session. On the wire this is the single
/// `supports_join` boolean.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActivationMode {
    /// Over-the-air activation (`supports_join = true`).
    Otaa,
    /// Activation by personalization (`supports_join = false`).
    Abp,
}

impl fmt::Display for ActivationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivationMode::Otaa => f.write_str("OTAA"),
            ActivationMode::Abp => f.write_str("ABP"),
        }
    }
}

/// Capabilities and radio defaults shared by a class of end-devices.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    /// Device-profile ID (UUID string).
    pub id: String,
    /// Device-profile name.
    pub name: String,
    /// Organization ID to which the device-profile is assigned.
    #[serde(with = "crate::json::int64")]
    pub organization_id: i64,
    /// Network-server ID on which the device-profile is provisioned.
    #[serde(with = "crate::json::int64")]
    pub network_server_id: i64,
    /// End-Device supports Class B.
    pub supports_class_b: bool,
    /// Maximum delay for the End-Device to answer a MAC request or a confirmed DL frame (mandatory if class B mode supported).
    pub class_b_timeout: u32,
    /// Mandatory if class B mode supported.
    pub ping_slot_period: u32,
    /// Mandatory if class B mode supported.
    pub ping_slot_dr: u32,
    /// Mandatory if class B mode supported.
    pub ping_slot_freq: u32,
    /// End-Device supports Class C.
    pub supports_class_c: bool,
    /// Maximum delay for the End-Device to answer a MAC request or a confirmed DL frame (mandatory if class C mode supported).
    pub class_c_timeout: u32,
    /// Version of the LoRaWAN supported by the End-Device.
    pub mac_version: String,
    /// Revision of the Regional Parameters document supported by the End-Device.
    pub reg_params_revision: String,
    /// Class A RX1 delay (mandatory for ABP).
    pub rx_delay_1: u32,
    /// RX1 data rate offset (mandatory for ABP).
    pub rx_dr_offset_1: u32,
    /// RX2 data rate (mandatory for ABP).
    pub rx_datarate_2: u32,
    /// RX2 channel frequency (mandatory for ABP).
    pub rx_freq_2: u32,
    /// List of factory-preset frequencies (mandatory for ABP).
    pub factory_preset_freqs: Vec<u32>,
    /// Maximum EIRP supported by the End-Device.
    pub max_eirp: u32,
    /// Maximum duty cycle supported by the End-Device.
    pub max_duty_cycle: u32,
    /// End-Device supports Join (OTAA) or not (ABP).
    pub supports_join: bool,
    /// RF region name.
    pub rf_region: String,
    /// End-Device uses 32bit FCnt (mandatory for LoRaWAN 1.0 End-Device).
    pub supports_32bit_f_cnt: bool,
    /// Payload codec.
    /// Leave blank to disable the codec feature.
    pub payload_codec: String,
    /// Payload encoder script.
    /// Depending the codec, it is possible to provide a script which implements
    /// the encoder function.
    pub payload_encoder_script: String,
    /// Payload decoder script.
    /// Depending the codec, it is possible to provide a script which implements
    /// the decoder function.
    pub payload_decoder_script: String,
    /// Geolocation buffer TTL (in seconds).
    /// When > 0, uplink RX meta-data will be stored in a buffer so that
    /// the meta-data of multiple uplinks can be used for geolocation.
    pub geoloc_buffer_ttl: u32,
    /// Geolocation minimum buffer size.
    /// When > 0, geolocation will only be performed when the buffer has
    /// at least the given size.
    pub geoloc_min_buffer_size: u32,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl DeviceProfile {
    /// Returns the profile, or a shared zero-valued one when there is none.
    pub fn or_default(profile: Option<&DeviceProfile>) -> &DeviceProfile {
        profile.unwrap_or(&*EMPTY)
    }

    pub fn activation_mode(&self) -> ActivationMode {
        if self.supports_join {
            ActivationMode::Otaa
        } else {
            ActivationMode::Abp
        }
    }

    pub fn set_activation_mode(&mut self, mode: ActivationMode) {
        self.supports_join = mode == ActivationMode::Otaa;
    }

    /// An empty codec name disables payload encoding and decoding.
    pub fn payload_codec_enabled(&self) -> bool {
        !self.payload_codec.is_empty()
    }

    pub fn geoloc_buffering_enabled(&self) -> bool {
        self.geoloc_buffer_ttl > 0
    }

    pub fn geoloc_min_buffer_enabled(&self) -> bool {
        self.geoloc_min_buffer_size > 0
    }
}

impl Preserving for DeviceProfile {
    fn accepts(tag: u32, wire_type: WireType) -> bool {
        match tag {
            1 | 9 | 10 | 19 | 21 | 24..=26 => wire_type == WireType::LengthDelimited,
            2..=8 | 11..=14 | 16..=18 | 20 | 22 | 23 | 27 | 28 => wire_type == WireType::Varint,
            // packed or one element per field, both are valid proto3 input
            15 => matches!(wire_type, WireType::LengthDelimited | WireType::Varint),
            _ => false,
        }
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown_fields
    }
}

impl prost::Message for DeviceProfile {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        if !self.id.is_empty() {
            encoding::string::encode(1, &self.id, buf);
        }
        if self.supports_class_b {
            encoding::bool::encode(2, &self.supports_class_b, buf);
        }
        if self.class_b_timeout != 0 {
            encoding::uint32::encode(3, &self.class_b_timeout, buf);
        }
        if self.ping_slot_period != 0 {
            encoding::uint32::encode(4, &self.ping_slot_period, buf);
        }
        if self.ping_slot_dr != 0 {
            encoding::uint32::encode(5, &self.ping_slot_dr, buf);
        }
        if self.ping_slot_freq != 0 {
            encoding::uint32::encode(6, &self.ping_slot_freq, buf);
        }
        if self.supports_class_c {
            encoding::bool::encode(7, &self.supports_class_c, buf);
        }
        if self.class_c_timeout != 0 {
            encoding::uint32::encode(8, &self.class_c_timeout, buf);
        }
        if !self.mac_version.is_empty() {
            encoding::string::encode(9, &self.mac_version, buf);
        }
        if !self.reg_params_revision.is_empty() {
            encoding::string::encode(10, &self.reg_params_revision, buf);
        }
        if self.rx_delay_1 != 0 {
            encoding::uint32::encode(11, &self.rx_delay_1, buf);
        }
        if self.rx_dr_offset_1 != 0 {
            encoding::uint32::encode(12, &self.rx_dr_offset_1, buf);
        }
        if self.rx_datarate_2 != 0 {
            encoding::uint32::encode(13, &self.rx_datarate_2, buf);
        }
        if self.rx_freq_2 != 0 {
            encoding::uint32::encode(14, &self.rx_freq_2, buf);
        }
        encoding::uint32::encode_packed(15, &self.factory_preset_freqs, buf);
        if self.max_eirp != 0 {
            encoding::uint32::encode(16, &self.max_eirp, buf);
        }
        if self.max_duty_cycle != 0 {
            encoding::uint32::encode(17, &self.max_duty_cycle, buf);
        }
        if self.supports_join {
            encoding::bool::encode(18, &self.supports_join, buf);
        }
        if !self.rf_region.is_empty() {
            encoding::string::encode(19, &self.rf_region, buf);
        }
        if self.supports_32bit_f_cnt {
            encoding::bool::encode(20, &self.supports_32bit_f_cnt, buf);
        }
        if !self.name.is_empty() {
            encoding::string::encode(21, &self.name, buf);
        }
        if self.organization_id != 0 {
            encoding::int64::encode(22, &self.organization_id, buf);
        }
        if self.network_server_id != 0 {
            encoding::int64::encode(23, &self.network_server_id, buf);
        }
        if !self.payload_codec.is_empty() {
            encoding::string::encode(24, &self.payload_codec, buf);
        }
        if !self.payload_encoder_script.is_empty() {
            encoding::string::encode(25, &self.payload_encoder_script, buf);
        }
        if !self.payload_decoder_script.is_empty() {
            encoding::string::encode(26, &self.payload_decoder_script, buf);
        }
        if self.geoloc_buffer_ttl != 0 {
            encoding::uint32::encode(27, &self.geoloc_buffer_ttl, buf);
        }
        if self.geoloc_min_buffer_size != 0 {
            encoding::uint32::encode(28, &self.geoloc_min_buffer_size, buf);
        }
        self.unknown_fields.encode_raw(buf);
    }

    fn merge(&mut self, buf: impl Buf) -> Result<(), DecodeError>
    where
        Self: Sized,
    {
        wire::merge(self, buf)
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        if !Self::accepts(tag, wire_type) {
            return self.unknown_fields.merge_field(tag, wire_type, buf);
        }
        use encoding::{bool, int64, string, uint32};

        let (result, field) = match tag {
            1 => (string::merge(wire_type, &mut self.id, buf, ctx), "id"),
            2 => (bool::merge(wire_type, &mut self.supports_class_b, buf, ctx), "supports_class_b"),
            3 => (uint32::merge(wire_type, &mut self.class_b_timeout, buf, ctx), "class_b_timeout"),
            4 => (uint32::merge(wire_type, &mut self.ping_slot_period, buf, ctx), "ping_slot_period"),
            5 => (uint32::merge(wire_type, &mut self.ping_slot_dr, buf, ctx), "ping_slot_dr"),
            6 => (uint32::merge(wire_type, &mut self.ping_slot_freq, buf, ctx), "ping_slot_freq"),
            7 => (bool::merge(wire_type, &mut self.supports_class_c, buf, ctx), "supports_class_c"),
            8 => (uint32::merge(wire_type, &mut self.class_c_timeout, buf, ctx), "class_c_timeout"),
            9 => (string::merge(wire_type, &mut self.mac_version, buf, ctx), "mac_version"),
            10 => (
                string::merge(wire_type, &mut self.reg_params_revision, buf, ctx),
                "reg_params_revision",
            ),
            11 => (uint32::merge(wire_type, &mut self.rx_delay_1, buf, ctx), "rx_delay_1"),
            12 => (uint32::merge(wire_type, &mut self.rx_dr_offset_1, buf, ctx), "rx_dr_offset_1"),
            13 => (uint32::merge(wire_type, &mut self.rx_datarate_2, buf, ctx), "rx_datarate_2"),
            14 => (uint32::merge(wire_type, &mut self.rx_freq_2, buf, ctx), "rx_freq_2"),
            15 => (
                uint32::merge_repeated(wire_type, &mut self.factory_preset_freqs, buf, ctx),
                "factory_preset_freqs",
            ),
            16 => (uint32::merge(wire_type, &mut self.max_eirp, buf, ctx), "max_eirp"),
            17 => (uint32::merge(wire_type, &mut self.max_duty_cycle, buf, ctx), "max_duty_cycle"),
            18 => (bool::merge(wire_type, &mut self.supports_join, buf, ctx), "supports_join"),
            19 => (string::merge(wire_type, &mut self.rf_region, buf, ctx), "rf_region"),
            20 => (
                bool::merge(wire_type, &mut self.supports_32bit_f_cnt, buf, ctx),
                "supports_32bit_f_cnt",
            ),
            21 => (string::merge(wire_type, &mut self.name, buf, ctx), "name"),
            22 => (int64::merge(wire_type, &mut self.organization_id, buf, ctx), "organization_id"),
            23 => (int64::merge(wire_type, &mut self.network_server_id, buf, ctx), "network_server_id"),
            24 => (string::merge(wire_type, &mut self.payload_codec, buf, ctx), "payload_codec"),
            25 => (
                string::merge(wire_type, &mut self.payload_encoder_script, buf, ctx),
                "payload_encoder_script",
            ),
            26 => (
                string::merge(wire_type, &mut self.payload_decoder_script, buf, ctx),
                "payload_decoder_script",
            ),
            27 => (uint32::merge(wire_type, &mut self.geoloc_buffer_ttl, buf, ctx), "geoloc_buffer_ttl"),
            28 => (
                uint32::merge(wire_type, &mut self.geoloc_min_buffer_size, buf, ctx),
                "geoloc_min_buffer_size",
            ),
            _ => return self.unknown_fields.merge_field(tag, wire_type, buf),
        };
        result.map_err(|mut error| {
            error.push(STRUCT_NAME, field);
            error
        })
    }

    fn encoded_len(&self) -> usize {
        use encoding::{bool, int64, string, uint32};

        let strings = [
            (1, &self.id),
            (9, &self.mac_version),
            (10, &self.reg_params_revision),
            (19, &self.rf_region),
            (21, &self.name),
            (24, &self.payload_codec),
            (25, &self.payload_encoder_script),
            (26, &self.payload_decoder_script),
        ];
        let uints = [
            (3, self.class_b_timeout),
            (4, self.ping_slot_period),
            (5, self.ping_slot_dr),
            (6, self.ping_slot_freq),
            (8, self.class_c_timeout),
            (11, self.rx_delay_1),
            (12, self.rx_dr_offset_1),
            (13, self.rx_datarate_2),
            (14, self.rx_freq_2),
            (16, self.max_eirp),
            (17, self.max_duty_cycle),
            (27, self.geoloc_buffer_ttl),
            (28, self.geoloc_min_buffer_size),
        ];
        let flags = [
            (2, self.supports_class_b),
            (7, self.supports_class_c),
            (18, self.supports_join),
            (20, self.supports_32bit_f_cnt),
        ];
        let ids = [(22, self.organization_id), (23, self.network_server_id)];

        strings
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(tag, value)| string::encoded_len(*tag, value))
            .chain(
                uints
                    .iter()
                    .filter(|(_, value)| *value != 0)
                    .map(|(tag, value)| uint32::encoded_len(*tag, value)),
            )
            .chain(
                flags
                    .iter()
                    .filter(|(_, value)| *value)
                    .map(|(tag, value)| bool::encoded_len(*tag, value)),
            )
            .chain(
                ids.iter()
                    .filter(|(_, value)| *value != 0)
                    .map(|(tag, value)| int64::encoded_len(*tag, value)),
            )
            .sum::<usize>()
            + uint32::encoded_len_packed(15, &self.factory_preset_freqs)
            + self.unknown_fields.len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut w = TextWriter::new(f);
        w.string("id", &self.id)?;
        w.string("name", &self.name)?;
        w.int64("organization_id", self.organization_id)?;
        w.int64("network_server_id", self.network_server_id)?;
        w.bool("supports_class_b", self.supports_class_b)?;
        w.uint32("class_b_timeout", self.class_b_timeout)?;
        w.uint32("ping_slot_period", self.ping_slot_period)?;
        w.uint32("ping_slot_dr", self.ping_slot_dr)?;
        w.uint32("ping_slot_freq", self.ping_slot_freq)?;
        w.bool("supports_class_c", self.supports_class_c)?;
        w.uint32("class_c_timeout", self.class_c_timeout)?;
        w.string("mac_version", &self.mac_version)?;
        w.string("reg_params_revision", &self.reg_params_revision)?;
        w.uint32("rx_delay_1", self.rx_delay_1)?;
        w.uint32("rx_dr_offset_1", self.rx_dr_offset_1)?;
        w.uint32("rx_datarate_2", self.rx_datarate_2)?;
        w.uint32("rx_freq_2", self.rx_freq_2)?;
        w.repeated_uint32("factory_preset_freqs", &self.factory_preset_freqs)?;
        w.uint32("max_eirp", self.max_eirp)?;
        w.uint32("max_duty_cycle", self.max_duty_cycle)?;
        w.bool("supports_join", self.supports_join)?;
        w.string("rf_region", &self.rf_region)?;
        w.bool("supports_32bit_f_cnt", self.supports_32bit_f_cnt)?;
        w.string("payload_codec", &self.payload_codec)?;
        w.string("payload_encoder_script", &self.payload_encoder_script)?;
        w.string("payload_decoder_script", &self.payload_decoder_script)?;
        w.uint32("geoloc_buffer_ttl", self.geoloc_buffer_ttl)?;
        w.uint32("geoloc_min_buffer_size", self.geoloc_min_buffer_size)?;
        w.unknown(&self.unknown_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prost::Message;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rstest::rstest;
    use serde_json::json;

    const EU868_FREQS: [u32; 3] = [868_100_000, 868_300_000, 868_500_000];

    const SAMPLE_BYTES: &[u8] = &[
        0x0a, 0x02, b'd', b'p', // id
        0x10, 0x01, // supports_class_b
        0x20, 0x80, 0x01, // ping_slot_period
        0x4a, 0x05, b'1', b'.', b'0', b'.', b'3', // mac_version
        0x7a, 0x0f, // factory_preset_freqs, packed
        0xa0, 0xcf, 0xf8, 0x9d, 0x03, //
        0xe0, 0xe9, 0x84, 0x9e, 0x03, //
        0xa0, 0x84, 0x91, 0x9e, 0x03, //
        0x90, 0x01, 0x01, // supports_join
        0xc2, 0x01, 0x0b, b'C', b'A', b'Y', b'E', b'N', b'N', b'E', b'_', b'L', b'P', b'P', // payload_codec
        0xd8, 0x01, 0x90, 0x1c, // geoloc_buffer_ttl
    ];

    fn sample() -> DeviceProfile {
        DeviceProfile {
            id: "dp".into(),
            supports_class_b: true,
            ping_slot_period: 128,
            mac_version: "1.0.3".into(),
            factory_preset_freqs: EU868_FREQS.to_vec(),
            supports_join: true,
            payload_codec: "CAYENNE_LPP".into(),
            geoloc_buffer_ttl: 3600,
            ..Default::default()
        }
    }

    fn random_profile(rng: &mut StdRng) -> DeviceProfile {
        let word = |rng: &mut StdRng| -> String {
            let len = rng.gen_range(0..16);
            (0..len).map(|_| rng.gen_range(' '..='~')).collect()
        };
        DeviceProfile {
            id: word(rng),
            name: word(rng),
            organization_id: rng.gen(),
            network_server_id: rng.gen(),
            supports_class_b: rng.gen_bool(0.5),
            class_b_timeout: rng.gen(),
            ping_slot_period: rng.gen(),
            ping_slot_dr: rng.gen_range(0..16),
            ping_slot_freq: rng.gen(),
            supports_class_c: rng.gen_bool(0.5),
            class_c_timeout: rng.gen(),
            mac_version: word(rng),
            reg_params_revision: word(rng),
            rx_delay_1: rng.gen_range(0..16),
            rx_dr_offset_1: rng.gen_range(0..8),
            rx_datarate_2: rng.gen_range(0..16),
            rx_freq_2: rng.gen(),
            factory_preset_freqs: (0..rng.gen_range(0..8)).map(|_| rng.gen()).collect(),
            max_eirp: rng.gen_range(0..30),
            max_duty_cycle: rng.gen_range(0..100),
            supports_join: rng.gen_bool(0.5),
            rf_region: word(rng),
            supports_32bit_f_cnt: rng.gen_bool(0.5),
            payload_codec: word(rng),
            payload_encoder_script: word(rng),
            payload_decoder_script: word(rng),
            geoloc_buffer_ttl: rng.gen(),
            geoloc_min_buffer_size: rng.gen(),
            unknown_fields: UnknownFields::default(),
        }
    }

    #[test]
    fn encodes_with_fixed_tags_in_tag_order() {
        assert_eq!(sample().encode_to_vec(), SAMPLE_BYTES);
        assert_eq!(sample().encoded_len(), SAMPLE_BYTES.len());
    }

    #[test]
    fn random_profiles_round_trip() {
        let mut rng = StdRng::seed_from_u64(0xd0f1);
        for _ in 0..64 {
            let profile = random_profile(&mut rng);
            let bytes = profile.encode_to_vec();
            assert_eq!(bytes.len(), profile.encoded_len());
            assert_eq!(DeviceProfile::decode(bytes.as_slice()).unwrap(), profile);
        }
    }

    #[test]
    fn preset_frequencies_keep_length_and_order() {
        let profile = DeviceProfile {
            factory_preset_freqs: EU868_FREQS.to_vec(),
            ..Default::default()
        };
        let decoded = DeviceProfile::decode(profile.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.factory_preset_freqs, EU868_FREQS);
    }

    #[test]
    fn unpacked_preset_frequencies_are_accepted() {
        let mut bytes = Vec::new();
        for freq in EU868_FREQS {
            encoding::uint32::encode(15, &freq, &mut bytes);
        }
        let decoded = DeviceProfile::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded.factory_preset_freqs, EU868_FREQS);
    }

    #[rstest]
    #[case("", false)]
    #[case("CAYENNE_LPP", true)]
    #[case("CUSTOM_JS", true)]
    fn codec_sentinel_survives_round_trip(#[case] codec: &str, #[case] enabled: bool) {
        let profile = DeviceProfile {
            payload_codec: codec.to_string(),
            ..Default::default()
        };
        let decoded = DeviceProfile::decode(profile.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.payload_codec, codec);
        assert_eq!(decoded.payload_codec_enabled(), enabled);
    }

    #[test]
    fn empty_input_gives_zero_values() {
        let profile = DeviceProfile::decode(&b""[..]).unwrap();
        assert_eq!(profile, DeviceProfile::default());
        assert!(profile.factory_preset_freqs.is_empty());
        assert_eq!(profile.activation_mode(), ActivationMode::Abp);
        assert!(!profile.geoloc_buffering_enabled());
        assert!(!profile.geoloc_min_buffer_enabled());
    }

    #[test]
    fn absent_profile_reads_as_zero() {
        let profile = DeviceProfile::or_default(None);
        assert_eq!(profile.mac_version, "");
        assert_eq!(profile.rx_freq_2, 0);
        assert!(!profile.supports_class_c);
    }

    #[test]
    fn unknown_fields_are_re_emitted() {
        // tag 40 length-delimited, tag 41 fixed32
        let unknown: [u8; 11] = [0xc2, 0x02, 0x02, 0x01, 0x02, 0xcd, 0x02, 0x00, 0x00, 0x00, 0x01];
        let mut bytes = SAMPLE_BYTES.to_vec();
        bytes.extend_from_slice(&unknown);

        let profile = DeviceProfile::decode(bytes.as_slice()).unwrap();
        assert_eq!(profile.unknown_fields.as_bytes(), &unknown[..]);
        assert_eq!(profile.encode_to_vec(), bytes);
        assert_eq!(profile.encoded_len(), bytes.len());
    }

    #[test]
    fn mismatched_wire_types_are_kept_as_unknown() {
        // factory_preset_freqs as fixed32, supports_class_b as length-delimited
        let bytes: [u8; 7] = [0x7d, 0x01, 0x02, 0x03, 0x04, 0x12, 0x00];
        let profile = DeviceProfile::decode(&bytes[..]).unwrap();
        assert!(profile.factory_preset_freqs.is_empty());
        assert!(!profile.supports_class_b);
        assert_eq!(profile.unknown_fields.as_bytes(), &bytes[..]);
        assert_eq!(profile.encode_to_vec(), bytes);
        assert_eq!(profile.to_string(), "/* 7 unknown bytes */");
    }

    #[test]
    fn activation_mode_maps_to_supports_join() {
        let mut profile = DeviceProfile::default();
        profile.set_activation_mode(ActivationMode::Otaa);
        assert!(profile.supports_join);
        assert_eq!(profile.activation_mode(), ActivationMode::Otaa);
        profile.set_activation_mode(ActivationMode::Abp);
        assert!(!profile.supports_join);
        assert_eq!(profile.activation_mode().to_string(), "ABP");
    }

    #[test]
    fn renders_json() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["factory_preset_freqs"], json!(EU868_FREQS));
        assert_eq!(value["payload_codec"], json!("CAYENNE_LPP"));
        assert_eq!(value["supports_32bit_f_cnt"], json!(false));
        assert_eq!(value["organization_id"], json!(0));

        let back: DeviceProfile = serde_json::from_value(value).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn renders_compact_text() {
        assert_eq!(
            sample().to_string(),
            concat!(
                r#"id:"dp" supports_class_b:true ping_slot_period:128 mac_version:"1.0.3" "#,
                "factory_preset_freqs:868100000 factory_preset_freqs:868300000 factory_preset_freqs:868500000 ",
                r#"supports_join:true payload_codec:"CAYENNE_LPP" geoloc_buffer_ttl:3600"#,
            )
        );
    }
}
