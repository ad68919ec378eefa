use std::result::Result as StdResult;

use thiserror::Error;

/// Error type shared by the billing, ledger, device and storage layers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackerError {
    #[error("Invalid reading: {0}")]
    InvalidReading(String),
    #[error("Invalid device: {0}")]
    InvalidDevice(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type Result<T> = StdResult<T, TrackerError>;

impl TrackerError {
    pub fn invalid_reading(message: impl Into<String>) -> Self {
        TrackerError::InvalidReading(message.into())
    }

    pub fn invalid_device(message: impl Into<String>) -> Self {
        TrackerError::InvalidDevice(message.into())
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        TrackerError::Persistence(message.into())
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Persistence(err.to_string())
    }
}
