//! HTTP client for the booking service's connection lookup.

use serde::Deserialize;
use tracing::debug;

use super::error::ResolutionError;
use super::recon::{parse_booking_date, station_ids_from_recon};
use super::{BookingResolver, ResolvedBooking};

/// Default base URL for the booking service.
const DEFAULT_BASE_URL: &str = "https://www.bahn.de";

/// Connection payload returned for a booking token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionResponse {
    /// Opaque reconstruction string describing the outbound trip.
    pub hinfahrt_recon: String,
    /// Booked outbound departure.
    pub hinfahrt_datum: String,
}

impl ConnectionResponse {
    /// Extract the route and departure from the payload.
    pub fn into_booking(self) -> Result<ResolvedBooking, ResolutionError> {
        let (origin_id, destination_id) = station_ids_from_recon(&self.hinfahrt_recon)?;
        let departure = parse_booking_date(&self.hinfahrt_datum)?;
        Ok(ResolvedBooking {
            origin_id,
            destination_id,
            departure,
        })
    }
}

/// Configuration for the booking client.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// Base URL for the service
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BookingConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves booking tokens against the live booking service.
#[derive(Debug, Clone)]
pub struct BookingClient {
    http: reqwest::Client,
    base_url: String,
}

impl BookingClient {
    pub fn new(config: BookingConfig) -> Result<Self, ResolutionError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the raw connection payload for a token.
    pub async fn fetch_connection(&self, token: &str) -> Result<ConnectionResponse, ResolutionError> {
        let url = format!("{}/web/api/angebote/verbindung/{}", self.base_url, token);
        debug!(%url, "resolving booking");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResolutionError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ResolutionError::Json {
            message: e.to_string(),
        })
    }
}

impl BookingResolver for BookingClient {
    async fn resolve(&self, token: &str) -> Result<ResolvedBooking, ResolutionError> {
        self.fetch_connection(token).await?.into_booking()
    }
}
