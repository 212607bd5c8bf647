use std::fmt;

use lazy_static::lazy_static;
use prost::bytes::{Buf, BufMut};
use prost::encoding::{self, DecodeContext, WireType};
use prost::DecodeError;
use serde::{Deserialize, Serialize};

use super::RatePolicy;
use crate::text::TextWriter;
use crate::wire::{self, Preserving, UnknownFields};

const STRUCT_NAME: &str = "ServiceProfile";

lazy_static! {
    static ref EMPTY: ServiceProfile = ServiceProfile::default();
}

/// Rate limiting and roaming policy of an organization on one network server.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceProfile {
    /// Service-profile ID (UUID string).
    /// This will be automatically set on create.
    pub id: String,
    /// Service-profile name.
    pub name: String,
    /// Organization ID to which the service-profile is assigned.
    #[serde(with = "crate::json::int64")]
    pub organization_id: i64,
    /// Network-server ID on which the service-profile is provisioned.
    #[serde(with = "crate::json::int64")]
    pub network_server_id: i64,
    /// Token bucket filling rate, including ACKs (packet/h).
    pub ul_rate: u32,
    /// Token bucket burst size.
    pub ul_bucket_size: u32,
    /// Drop or mark when exceeding ULRate.
    #[serde(with = "crate::json::rate_policy")]
    pub ul_rate_policy: i32,
    /// Token bucket filling rate, including ACKs (packet/h).
    pub dl_rate: u32,
    /// Token bucket burst size.
    pub dl_bucket_size: u32,
    /// Drop or mark when exceeding DLRate.
    #[serde(with = "crate::json::rate_policy")]
    pub dl_rate_policy: i32,
    /// GW metadata (RSSI, SNR, GW geoloc., etc.) are added to the packet sent to AS.
    pub add_gw_metadata: bool,
    /// Frequency to initiate an End-Device status request (request/day).
    pub dev_status_req_freq: u32,
    /// Report End-Device battery level to AS.
    pub report_dev_status_battery: bool,
    /// Report End-Device margin to AS.
    pub report_dev_status_margin: bool,
    /// Minimum allowed data rate. Used for ADR.
    pub dr_min: u32,
    /// Maximum allowed data rate. Used for ADR.
    pub dr_max: u32,
    /// Channel mask. sNS does not have to obey (i.e., informative).
    #[serde(with = "crate::json::base64_bytes")]
    pub channel_mask: Vec<u8>,
    /// Passive Roaming allowed.
    pub pr_allowed: bool,
    /// Handover Roaming allowed.
    pub hr_allowed: bool,
    /// Roaming Activation allowed.
    pub ra_allowed: bool,
    /// Enable network geolocation service.
    pub nwk_geo_loc: bool,
    /// Target Packet Error Rate.
    pub target_per: u32,
    /// Minimum number of receiving GWs (informative).
    pub min_gw_diversity: u32,
    #[serde(skip)]
    pub unknown_fields: UnknownFields,
}

impl ServiceProfile {
    /// Returns the profile, or a shared zero-valued one when there is none.
    pub fn or_default(profile: Option<&ServiceProfile>) -> &ServiceProfile {
        profile.unwrap_or(&*EMPTY)
    }

    /// Returns the enum value of `ul_rate_policy`, or the default if the field is set to an invalid enum value.
    pub fn ul_rate_policy(&self) -> RatePolicy {
        RatePolicy::try_from(self.ul_rate_policy).unwrap_or_default()
    }

    /// Sets `ul_rate_policy` to the provided enum value.
    pub fn set_ul_rate_policy(&mut self, value: RatePolicy) {
        self.ul_rate_policy = value as i32;
    }

    /// Returns the enum value of `dl_rate_policy`, or the default if the field is set to an invalid enum value.
    pub fn dl_rate_policy(&self) -> RatePolicy {
        RatePolicy::try_from(self.dl_rate_policy).unwrap_or_default()
    }

    /// Sets `dl_rate_policy` to the provided enum value.
    pub fn set_dl_rate_policy(&mut self, value: RatePolicy) {
        self.dl_rate_policy = value as i32;
    }

    /// 0 means no minimum gateway count is requested.
    pub fn min_gw_diversity_enabled(&self) -> bool {
        self.min_gw_diversity > 0
    }

    pub fn roaming_allowed(&self) -> bool {
        self.pr_allowed || self.hr_allowed || self.ra_allowed
    }
}

impl Preserving for ServiceProfile {
    fn accepts(tag: u32, wire_type: WireType) -> bool {
        match tag {
            1 | 14 | 21 => wire_type == WireType::LengthDelimited,
            2..=13 | 15..=20 | 22 | 23 => wire_type == WireType::Varint,
            _ => false,
        }
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown_fields
    }
}

impl prost::Message for ServiceProfile {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        if !self.id.is_empty() {
            encoding::string::encode(1, &self.id, buf);
        }
        if self.ul_rate != 0 {
            encoding::uint32::encode(2, &self.ul_rate, buf);
        }
        if self.ul_bucket_size != 0 {
            encoding::uint32::encode(3, &self.ul_bucket_size, buf);
        }
        if self.ul_rate_policy != 0 {
            encoding::int32::encode(4, &self.ul_rate_policy, buf);
        }
        if self.dl_rate != 0 {
            encoding::uint32::encode(5, &self.dl_rate, buf);
        }
        if self.dl_bucket_size != 0 {
            encoding::uint32::encode(6, &self.dl_bucket_size, buf);
        }
        if self.dl_rate_policy != 0 {
            encoding::int32::encode(7, &self.dl_rate_policy, buf);
        }
        if self.add_gw_metadata {
            encoding::bool::encode(8, &self.add_gw_metadata, buf);
        }
        if self.dev_status_req_freq != 0 {
            encoding::uint32::encode(9, &self.dev_status_req_freq, buf);
        }
        if self.report_dev_status_battery {
            encoding::bool::encode(10, &self.report_dev_status_battery, buf);
        }
        if self.report_dev_status_margin {
            encoding::bool::encode(11, &self.report_dev_status_margin, buf);
        }
        if self.dr_min != 0 {
            encoding::uint32::encode(12, &self.dr_min, buf);
        }
        if self.dr_max != 0 {
            encoding::uint32::encode(13, &self.dr_max, buf);
        }
        if !self.channel_mask.is_empty() {
            encoding::bytes::encode(14, &self.channel_mask, buf);
        }
        if self.pr_allowed {
            encoding::bool::encode(15, &self.pr_allowed, buf);
        }
        if self.hr_allowed {
            encoding::bool::encode(16, &self.hr_allowed, buf);
        }
        if self.ra_allowed {
            encoding::bool::encode(17, &self.ra_allowed, buf);
        }
        if self.nwk_geo_loc {
            encoding::bool::encode(18, &self.nwk_geo_loc, buf);
        }
        if self.target_per != 0 {
            encoding::uint32::encode(19, &self.target_per, buf);
        }
        if self.min_gw_diversity != 0 {
            encoding::uint32::encode(20, &self.min_gw_diversity, buf);
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
        let (result, field) = match tag {
            1 => (encoding::string::merge(wire_type, &mut self.id, buf, ctx), "id"),
            2 => (encoding::uint32::merge(wire_type, &mut self.ul_rate, buf, ctx), "ul_rate"),
            3 => (encoding::uint32::merge(wire_type, &mut self.ul_bucket_size, buf, ctx), "ul_bucket_size"),
            4 => (encoding::int32::merge(wire_type, &mut self.ul_rate_policy, buf, ctx), "ul_rate_policy"),
            5 => (encoding::uint32::merge(wire_type, &mut self.dl_rate, buf, ctx), "dl_rate"),
            6 => (encoding::uint32::merge(wire_type, &mut self.dl_bucket_size, buf, ctx), "dl_bucket_size"),
            7 => (encoding::int32::merge(wire_type, &mut self.dl_rate_policy, buf, ctx), "dl_rate_policy"),
            8 => (encoding::bool::merge(wire_type, &mut self.add_gw_metadata, buf, ctx), "add_gw_metadata"),
            9 => (
                encoding::uint32::merge(wire_type, &mut self.dev_status_req_freq, buf, ctx),
                "dev_status_req_freq",
            ),
            10 => (
                encoding::bool::merge(wire_type, &mut self.report_dev_status_battery, buf, ctx),
                "report_dev_status_battery",
            ),
            11 => (
                encoding::bool::merge(wire_type, &mut self.report_dev_status_margin, buf, ctx),
                "report_dev_status_margin",
            ),
            12 => (encoding::uint32::merge(wire_type, &mut self.dr_min, buf, ctx), "dr_min"),
            13 => (encoding::uint32::merge(wire_type, &mut self.dr_max, buf, ctx), "dr_max"),
            14 => (encoding::bytes::merge(wire_type, &mut self.channel_mask, buf, ctx), "channel_mask"),
            15 => (encoding::bool::merge(wire_type, &mut self.pr_allowed, buf, ctx), "pr_allowed"),
            16 => (encoding::bool::merge(wire_type, &mut self.hr_allowed, buf, ctx), "hr_allowed"),
            17 => (encoding::bool::merge(wire_type, &mut self.ra_allowed, buf, ctx), "ra_allowed"),
            18 => (encoding::bool::merge(wire_type, &mut self.nwk_geo_loc, buf, ctx), "nwk_geo_loc"),
            19 => (encoding::uint32::merge(wire_type, &mut self.target_per, buf, ctx), "target_per"),
            20 => (encoding::uint32::merge(wire_type, &mut self.min_gw_diversity, buf, ctx), "min_gw_diversity"),
            21 => (encoding::string::merge(wire_type, &mut self.name, buf, ctx), "name"),
            22 => (encoding::int64::merge(wire_type, &mut self.organization_id, buf, ctx), "organization_id"),
            23 => (encoding::int64::merge(wire_type, &mut self.network_server_id, buf, ctx), "network_server_id"),
            _ => return self.unknown_fields.merge_field(tag, wire_type, buf),
        };
        result.map_err(|mut error| {
            error.push(STRUCT_NAME, field);
            error
        })
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.id.is_empty() {
            len += encoding::string::encoded_len(1, &self.id);
        }
        if self.ul_rate != 0 {
            len += encoding::uint32::encoded_len(2, &self.ul_rate);
        }
        if self.ul_bucket_size != 0 {
            len += encoding::uint32::encoded_len(3, &self.ul_bucket_size);
        }
        if self.ul_rate_policy != 0 {
            len += encoding::int32::encoded_len(4, &self.ul_rate_policy);
        }
        if self.dl_rate != 0 {
            len += encoding::uint32::encoded_len(5, &self.dl_rate);
        }
        if self.dl_bucket_size != 0 {
            len += encoding::uint32::encoded_len(6, &self.dl_bucket_size);
        }
        if self.dl_rate_policy != 0 {
            len += encoding::int32::encoded_len(7, &self.dl_rate_policy);
        }
        if self.add_gw_metadata {
            len += encoding::bool::encoded_len(8, &self.add_gw_metadata);
        }
        if self.dev_status_req_freq != 0 {
            len += encoding::uint32::encoded_len(9, &self.dev_status_req_freq);
        }
        if self.report_dev_status_battery {
            len += encoding::bool::encoded_len(10, &self.report_dev_status_battery);
        }
        if self.report_dev_status_margin {
            len += encoding::bool::encoded_len(11, &self.report_dev_status_margin);
        }
        if self.dr_min != 0 {
            len += encoding::uint32::encoded_len(12, &self.dr_min);
        }
        if self.dr_max != 0 {
            len += encoding::uint32::encoded_len(13, &self.dr_max);
        }
        if !self.channel_mask.is_empty() {
            len += encoding::bytes::encoded_len(14, &self.channel_mask);
        }
        if self.pr_allowed {
            len += encoding::bool::encoded_len(15, &self.pr_allowed);
        }
        if self.hr_allowed {
            len += encoding::bool::encoded_len(16, &self.hr_allowed);
        }
        if self.ra_allowed {
            len += encoding::bool::encoded_len(17, &self.ra_allowed);
        }
        if self.nwk_geo_loc {
            len += encoding::bool::encoded_len(18, &self.nwk_geo_loc);
        }
        if self.target_per != 0 {
            len += encoding::uint32::encoded_len(19, &self.target_per);
        }
        if self.min_gw_diversity != 0 {
            len += encoding::uint32::encoded_len(20, &self.min_gw_diversity);
        }
        if !self.name.is_empty() {
            len += encoding::string::encoded_len(21, &self.name);
        }
        if self.organization_id != 0 {
            len += encoding::int64::encoded_len(22, &self.organization_id);
        }
        if self.network_server_id != 0 {
            len += encoding::int64::encoded_len(23, &self.network_server_id);
        }
        len + self.unknown_fields.len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for ServiceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut w = TextWriter::new(f);
        w.string("id", &self.id)?;
        w.string("name", &self.name)?;
        w.int64("organization_id", self.organization_id)?;
        w.int64("network_server_id", self.network_server_id)?;
        w.uint32("ul_rate", self.ul_rate)?;
        w.uint32("ul_bucket_size", self.ul_bucket_size)?;
        w.rate_policy("ul_rate_policy", self.ul_rate_policy)?;
        w.uint32("dl_rate", self.dl_rate)?;
        w.uint32("dl_bucket_size", self.dl_bucket_size)?;
        w.rate_policy("dl_rate_policy", self.dl_rate_policy)?;
        w.bool("add_gw_metadata", self.add_gw_metadata)?;
        w.uint32("dev_status_req_freq", self.dev_status_req_freq)?;
        w.bool("report_dev_status_battery", self.report_dev_status_battery)?;
        w.bool("report_dev_status_margin", self.report_dev_status_margin)?;
        w.uint32("dr_min", self.dr_min)?;
        w.uint32("dr_max", self.dr_max)?;
        w.bytes("channel_mask", &self.channel_mask)?;
        w.bool("pr_allowed", self.pr_allowed)?;
        w.bool("hr_allowed", self.hr_allowed)?;
        w.bool("ra_allowed", self.ra_allowed)?;
        w.bool("nwk_geo_loc", self.nwk_geo_loc)?;
        w.uint32("target_per", self.target_per)?;
        w.uint32("min_gw_diversity", self.min_gw_diversity)?;
        w.unknown(&self.unknown_fields)
    }
}
