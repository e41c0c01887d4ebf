use thiserror::Error;

/// Everything that can go wrong while talking to the Drive API.
///
/// Only [`DriveError::RateLimited`] is transient; it is the single variant the
/// retry wrapper will back off and try again on. Everything else propagates
/// to the caller immediately.
#[derive(Debug, Error)]
pub enum DriveError {
    #[error("rate limited by the Drive API (HTTP {status})")]
    RateLimited { status: u16 },

    #[error("Drive API request failed with HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("{operation} still failing after {attempts} attempts, giving up")]
    RetriesExhausted { operation: String, attempts: u32 },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Drive service unavailable: {0}")]
    Auth(String),

    #[error("{id} is not a folder")]
    NotAFolder { id: String },
}

impl DriveError {
    pub fn is_transient(&self) -> bool {
        matches!(self, DriveError::RateLimited { .. })
    }
}
