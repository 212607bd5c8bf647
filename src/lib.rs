pub mod api;
pub mod codec;
pub mod error;
pub mod json;
pub mod logger;
mod text;
pub mod wire;

pub use error::{Error, Result};

pub mod constants {
    /// Deepest group nesting copied into preserved unknown fields.
    pub const GROUP_NESTING_LIMIT: u32 = 100;

    pub const DEFAULT_LOG_FILTER: &str = "info";
}
