//! Mock journey search for development and tests.
//!
//! Serves journeys from memory or from JSON files as if they were live API
//! responses, and records every request it receives.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::domain::Journey;
use crate::split::{JourneySearch, SearchError, SearchOptions};

use super::convert::convert_journeys;
use super::error::VendoError;
use super::types::JourneysResponse;

/// A request received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub origin_id: String,
    pub destination_id: String,
    pub options: SearchOptions,
}

/// Mock journey search keyed by (origin, destination).
///
/// Routes without a scripted response return no journeys.
#[derive(Debug, Clone, Default)]
pub struct MockVendoClient {
    responses: HashMap<(String, String), Result<Vec<Journey>, SearchError>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockVendoClient {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load responses from a directory.
    ///
    /// Expects files named `{origin}_{destination}.json` holding a raw
    /// `/journeys` response body.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, VendoError> {
        let data_dir = data_dir.as_ref();
        let mut mock = Self::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| VendoError::Api {
            status: 0,
            message: format!("Failed to read mock data directory: {e}"),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| VendoError::Api {
                status: 0,
                message: format!("Failed to read directory entry: {e}"),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some((origin, destination)) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|stem| stem.split_once('_'))
            else {
                debug!(?path, "skipping mock file without origin_destination name");
                continue;
            };

            let json = std::fs::read_to_string(&path).map_err(|e| VendoError::Api {
                status: 0,
                message: format!("Failed to read {path:?}: {e}"),
            })?;

            let response: JourneysResponse =
                serde_json::from_str(&json).map_err(|e| VendoError::Json {
                    message: format!("{path:?}: {e}"),
                    body: None,
                })?;

            let journeys = convert_journeys(&response.journeys)?;
            mock = mock.with_journeys(origin, destination, journeys);
        }

        if mock.responses.is_empty() {
            return Err(VendoError::Api {
                status: 0,
                message: format!("No mock journey files found in {data_dir:?}"),
            });
        }

        Ok(mock)
    }

    /// Serve `journeys` for a route.
    pub fn with_journeys(
        mut self,
        origin_id: impl Into<String>,
        destination_id: impl Into<String>,
        journeys: Vec<Journey>,
    ) -> Self {
        self.responses
            .insert((origin_id.into(), destination_id.into()), Ok(journeys));
        self
    }

    /// Fail every search for a route.
    pub fn with_failure(
        mut self,
        origin_id: impl Into<String>,
        destination_id: impl Into<String>,
        error: SearchError,
    ) -> Self {
        self.responses
            .insert((origin_id.into(), destination_id.into()), Err(error));
        self
    }

    /// Routes with a scripted response.
    pub fn available_routes(&self) -> Vec<(String, String)> {
        self.responses.keys().cloned().collect()
    }

    /// Requests received so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl JourneySearch for MockVendoClient {
    async fn search(
        &self,
        origin_id: &str,
        destination_id: &str,
        options: &SearchOptions,
    ) -> Result<Vec<Journey>, SearchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(MockCall {
                origin_id: origin_id.to_string(),
                destination_id: destination_id.to_string(),
                options: options.clone(),
            });
        }

        let key = (origin_id.to_string(), destination_id.to_string());
        match self.responses.get(&key) {
            Some(response) => response.clone(),
            None => {
                debug!(origin_id, destination_id, "no mock data for route");
                Ok(Vec::new())
            }
        }
    }
}
