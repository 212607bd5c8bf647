use thiserror::Error;

use crate::codec::Format;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] prost::DecodeError),
    #[error("invalid profile json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("profiles cannot be read from {0} format")]
    UnsupportedFormat(Format),
    #[error("logger already initialised: {0}")]
    Logger(#[from] tracing_subscriber::util::TryInitError),
}

pub type Result<T> = std::result::Result<T, Error>;
