use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("News API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unsupported record version {found} (newest known is {supported})")]
    UnsupportedRecordVersion { found: u32, supported: u32 },

    #[error("Unknown list: {0}")]
    UnknownList(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Errors caused by caller input rather than by the system.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidDate(_) | Error::UnknownList(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
