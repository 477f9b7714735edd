//! Journey search abstraction.

use std::future::Future;
use std::sync::Arc;

use crate::domain::Journey;

use super::options::SearchOptions;

/// Error from a journey search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The request did not complete (network, HTTP status, rate limiting).
    #[error("journey search failed: {message}")]
    Transport { message: String },

    /// The response did not have the expected journey shape.
    #[error("journey search returned an invalid response: {message}")]
    Validation { message: String },
}

/// Trait for searching journeys between two stations.
///
/// This abstraction lets the split analysis be driven by a live client or by
/// a scripted fake in tests. Implementations may be slow and may return any
/// number of journeys, in the service's own order.
pub trait JourneySearch: Send + Sync {
    fn search(
        &self,
        origin_id: &str,
        destination_id: &str,
        options: &SearchOptions,
    ) -> impl Future<Output = Result<Vec<Journey>, SearchError>> + Send;
}

impl<T: JourneySearch> JourneySearch for Arc<T> {
    fn search(
        &self,
        origin_id: &str,
        destination_id: &str,
        options: &SearchOptions,
    ) -> impl Future<Output = Result<Vec<Journey>, SearchError>> + Send {
        (**self).search(origin_id, destination_id, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SearchError::Transport {
            message: "connection reset".into(),
        };
        assert_eq!(err.to_string(), "journey search failed: connection reset");

        let err = SearchError::Validation {
            message: "legs: expected array".into(),
        };
        assert!(err.to_string().contains("invalid response"));
        assert!(err.to_string().contains("legs: expected array"));
    }
}
