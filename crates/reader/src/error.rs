//! Structured error types for the evaluation engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Codec, channel or fixture failure
    #[error(transparent)]
    Api(#[from] ectester_api::Error),

    #[error("report output failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("fixture JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration is invalid: {0}")]
    Config(#[from] toml::de::Error),

    #[error("hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("{faults} evaluation fault(s) exceed the threshold of {threshold}")]
    FaultThreshold { faults: usize, threshold: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the suite must stop immediately
    ///
    /// Transport failures leave the card in an unknown state; passing the
    /// fault threshold means the fixtures themselves are broken.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Api(e) => e.is_fatal(),
            Error::FaultThreshold { .. } => true,
            _ => false,
        }
    }
}
