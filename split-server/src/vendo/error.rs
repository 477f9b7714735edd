//! Journey search client error types.

use crate::split::SearchError;

use super::convert::ConversionError;

/// Errors from the journey search HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum VendoError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by journey search API")]
    RateLimited,

    /// The response decoded but does not describe valid journeys
    #[error("invalid journey data: {0}")]
    Validation(#[from] ConversionError),
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_ref()
        .map(|body| format!(" (body: {body})"))
        .unwrap_or_default()
}

impl From<VendoError> for SearchError {
    fn from(err: VendoError) -> Self {
        let message = err.to_string();
        match err {
            VendoError::Json { .. } | VendoError::Validation(_) => {
                SearchError::Validation { message }
            }
            VendoError::Http(_) | VendoError::Api { .. } | VendoError::RateLimited => {
                SearchError::Transport { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = VendoError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = VendoError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value (body: <html>)");

        let err = VendoError::Json {
            message: "expected value".into(),
            body: None,
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");
    }

    #[test]
    fn maps_into_search_error() {
        let transport: SearchError = VendoError::RateLimited.into();
        assert!(matches!(transport, SearchError::Transport { .. }));

        let transport: SearchError = VendoError::Api {
            status: 503,
            message: "down".into(),
        }
        .into();
        assert!(matches!(transport, SearchError::Transport { .. }));

        let validation: SearchError =
            VendoError::Validation(ConversionError::MissingField("leg.departure")).into();
        assert_eq!(
            validation,
            SearchError::Validation {
                message: "invalid journey data: missing required field: leg.departure".into(),
            }
        );

        let validation: SearchError = VendoError::Json {
            message: "eof".into(),
            body: None,
        }
        .into();
        assert!(matches!(validation, SearchError::Validation { .. }));
    }
}
