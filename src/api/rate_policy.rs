use std::fmt;

/// Action taken by the network server when a token bucket runs empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum RatePolicy {
    /// Drop
    Drop = 0,
    /// Mark
    Mark = 1,
}

impl RatePolicy {
    /// String value of the enum field names used in the ProtoBuf definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            RatePolicy::Drop => "DROP",
            RatePolicy::Mark => "MARK",
        }
    }

    /// Creates an enum from field names used in the ProtoBuf definition.
    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "DROP" => Some(Self::Drop),
            "MARK" => Some(Self::Mark),
            _ => None,
        }
    }
}

impl fmt::Display for RatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str_name())
    }
}

/// Symbolic name of a raw wire value, if it is one we know.
pub(crate) fn name_of(value: i32) -> Option<&'static str> {
    RatePolicy::try_from(value).ok().map(|p| p.as_str_name())
}
