//! Booking resolution error types.

/// Errors that can occur when resolving a booking token.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The booking service returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The reconstruction string names no stations
    #[error("booking does not identify origin and destination stations")]
    MissingStations,

    /// The booked departure could not be read
    #[error("invalid booking date: {0}")]
    InvalidDate(String),
}
