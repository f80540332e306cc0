//! Error types for bookslot operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Past date: {0}")]
    PastDate(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
