//! Journey search client.
//!
//! This module provides an HTTP client for a db-rest style journey search
//! API (the `/journeys` endpoint), plus a mock that serves recorded
//! responses.
//!
//! Key characteristics of the API:
//! - Station ids are numeric strings (IBNR, e.g. `8000105`)
//! - Times are RFC 3339 with an offset
//! - Results are not deduplicated; the same itinerary can appear once per
//!   fare option

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{VendoClient, VendoConfig, journey_query};
pub use convert::{ConversionError, convert_journey, convert_journeys};
pub use error::VendoError;
pub use mock::{MockCall, MockVendoClient};
pub use types::{
    JourneyDto, JourneysResponse, LegDto, LineDto, PlaceDto, PriceDto, StopoverDto,
};
