//! Journey search HTTP client.
//!
//! Queries a db-rest style `/journeys` endpoint and converts the response to
//! domain types.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::Journey;
use crate::split::{FareClass, JourneySearch, SearchError, SearchOptions};

use super::convert::convert_journeys;
use super::error::VendoError;
use super::types::JourneysResponse;

/// Default base URL for the journey search API.
const DEFAULT_BASE_URL: &str = "https://v6.db.transport.rest";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Configuration for the journey search client.
#[derive(Debug, Clone)]
pub struct VendoConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl VendoConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for VendoConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the `/journeys` query string parameters.
pub fn journey_query(
    origin_id: &str,
    destination_id: &str,
    options: &SearchOptions,
) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("from", origin_id.to_string()),
        ("to", destination_id.to_string()),
        ("results", options.result_count.to_string()),
        ("stopovers", options.include_stopovers.to_string()),
        ("firstClass", (options.fare_class == FareClass::First).to_string()),
        ("notOnlyFastRoutes", "true".to_string()),
        ("remarks", "true".to_string()),
        (
            "deutschlandTicketDiscount",
            options.regional_ticket_discount.to_string(),
        ),
    ];

    if let Some(transfers) = options.transfer_limit {
        query.push(("transfers", transfers.to_string()));
    }
    if let Some(age) = options.passenger_age {
        query.push(("age", age.to_string()));
    }
    if let Some(card) = options.discount_card {
        let class = match card.fare_class {
            FareClass::First => "1st",
            FareClass::Second => "2nd",
        };
        query.push((
            "loyaltyCard",
            format!("bahncard-{class}-{}", card.tier.percent()),
        ));
    }
    if let Some(departure) = options.target_departure {
        query.push(("departure", departure.to_rfc3339()));
    }

    query
}

/// Journey search API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct VendoClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl VendoClient {
    /// Create a new client with the given configuration.
    pub fn new(config: VendoConfig) -> Result<Self, VendoError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Search journeys between two stations.
    pub async fn journeys(
        &self,
        origin_id: &str,
        destination_id: &str,
        options: &SearchOptions,
    ) -> Result<Vec<Journey>, VendoError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| VendoError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/journeys", self.base_url);
        let query = journey_query(origin_id, destination_id, options);
        debug!(origin_id, destination_id, ?options.target_departure, "searching journeys");

        let response = self.http.get(&url).query(&query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(VendoError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VendoError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: JourneysResponse =
            serde_json::from_str(&body).map_err(|e| VendoError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        let journeys = convert_journeys(&parsed.journeys)?;
        debug!(count = journeys.len(), "journeys received");
        Ok(journeys)
    }
}

impl JourneySearch for VendoClient {
    async fn search(
        &self,
        origin_id: &str,
        destination_id: &str,
        options: &SearchOptions,
    ) -> Result<Vec<Journey>, SearchError> {
        Ok(self.journeys(origin_id, destination_id, options).await?)
    }
}
