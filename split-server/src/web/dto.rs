//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::Journey;
use crate::split::{AnalysisError, AnalysisParams, DiscountTier, FareClass};
use crate::vendo::JourneyDto;

use super::routes::AppError;

/// Fare preferences shared by all analysis requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareRequest {
    /// 1 or 2
    pub travel_class: i64,

    pub passenger_age: Option<i64>,

    /// Discount card percentage (25, 50 or 100)
    pub bahn_card: Option<i64>,

    #[serde(default)]
    pub has_deutschland_ticket: bool,
}

impl FareRequest {
    /// Validate into analysis parameters.
    ///
    /// An unknown travel class or an impossible age is rejected. An unknown
    /// discount card is ignored.
    pub fn to_params(&self) -> Result<AnalysisParams, AppError> {
        let travel_class =
            FareClass::from_number(self.travel_class).ok_or_else(|| AppError::BadRequest {
                message: format!("Invalid travel class: {}", self.travel_class),
            })?;

        let mut params =
            AnalysisParams::new(travel_class).with_regional_ticket(self.has_deutschland_ticket);

        if let Some(age) = self.passenger_age {
            let age = u8::try_from(age).map_err(|_| AppError::BadRequest {
                message: format!("Invalid passenger age: {age}"),
            })?;
            params = params.with_passenger_age(age);
        }

        if let Some(percent) = self.bahn_card {
            match DiscountTier::from_percent(percent) {
                Some(tier) => params = params.with_discount_tier(tier),
                None => warn!(percent, "ignoring unknown discount card"),
            }
        }

        Ok(params)
    }
}

/// Request to analyze a journey the client already has.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub journey: JourneyDto,

    #[serde(flatten)]
    pub fare: FareRequest,
}

/// Request referring to a booked connection by its token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub vbid: String,

    #[serde(flatten)]
    pub fare: FareRequest,
}

/// Fare options for a booked connection.
#[derive(Debug, Serialize)]
pub struct BookedJourneysResponse {
    pub journeys: Vec<Journey>,
}

/// Payload of the SSE `error` event that ends a failed analysis.
#[derive(Debug, Serialize)]
pub struct ErrorEvent {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
}

impl From<&AnalysisError> for ErrorEvent {
    fn from(err: &AnalysisError) -> Self {
        Self {
            error: err.to_string(),
            station: err.station().map(|s| s.display_name().to_string()),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
