pub mod device_profile;
pub mod rate_policy;
pub mod service_profile;

pub use device_profile::{ActivationMode, DeviceProfile};
pub use rate_policy::RatePolicy;
pub use service_profile::ServiceProfile;
