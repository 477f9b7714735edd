//! Journey search API response DTOs.
//!
//! These types map directly to the `/journeys` JSON response. Fields the
//! service may leave out or send as `null` are `Option`; required values are
//! checked during conversion rather than by serde, so that a bad journey is
//! reported as a shape error with a useful message.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response from `GET /journeys`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneysResponse {
    pub journeys: Vec<JourneyDto>,

    /// Paging cursor for earlier results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earlier_ref: Option<String>,

    /// Paging cursor for later results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub later_ref: Option<String>,
}

/// A journey as returned by the service (or posted back by a client).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyDto {
    pub legs: Vec<LegDto>,
    pub price: Option<PriceDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDto {
    pub amount: f64,
    pub currency: Option<String>,
    pub hint: Option<String>,
}

/// A station, stop or location reference.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDto {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDto {
    pub name: Option<String>,
    pub product: Option<String>,
    pub product_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    /// Scheduled departure (RFC 3339).
    pub departure: Option<String>,

    /// Scheduled arrival (RFC 3339).
    pub arrival: Option<String>,

    pub origin: Option<PlaceDto>,
    pub destination: Option<PlaceDto>,
    pub line: Option<LineDto>,

    /// Walking marker. The service has sent booleans as well as other
    /// values here, so any truthy value counts.
    pub walking: Option<Value>,

    pub departure_platform: Option<String>,
    pub arrival_platform: Option<String>,
    pub cancelled: Option<bool>,

    /// Present when stopovers were requested.
    pub stopovers: Option<Vec<StopoverDto>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopoverDto {
    pub stop: Option<PlaceDto>,
    pub arrival: Option<String>,
    pub departure: Option<String>,
    pub load_factor: Option<Value>,
}
