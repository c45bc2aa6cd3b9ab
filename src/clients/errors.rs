use thiserror::Error;

/// Last.fm error code returned when an artist, album or track is unknown.
pub const LASTFM_NOT_FOUND: u32 = 6;

/// Errors raised while talking to Last.fm or setting the service up.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure, timeout or unreadable body
    #[error("LastFM request error: {0}")]
    LastFMRequestError(#[from] reqwest::Error),

    /// JSON that does not match the expected shape
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error body returned by the Last.fm API
    #[error("LastFM API error {code}: {message}")]
    LastFMApiError {
        /// Last.fm error code
        code: u32,
        /// Human readable message from Last.fm
        message: String,
    },

    /// Non-success status without a recognizable error body
    #[error("LastFM API unexpected response: {0}")]
    LastFMUnexpectedResponse(String),

    /// The user has no scrobbles to report
    #[error("No recent tracks found for {0}")]
    NoRecentTracks(String),

    /// Missing or invalid setting
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Socket errors from binding or serving the HTTP listener
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when Last.fm reported that the requested entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::LastFMApiError { code, .. } if *code == LASTFM_NOT_FOUND)
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
