//! Journey types.
//!
//! A `Journey` is an ordered list of legs with an optional fare. Journeys
//! come straight from the search service, so unlike legs they may be empty;
//! callers that need a start time use [`Journey::departure`], which is `None`
//! for an empty journey.

use serde::Serialize;

use super::{Leg, Price, Station, Timestamp};

/// A complete itinerary as offered by the journey search service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Journey {
    legs: Vec<Leg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<Price>,
}

impl Journey {
    /// Constructs a journey from legs in travel order.
    pub fn new(legs: Vec<Leg>) -> Self {
        Self { legs, price: None }
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn price(&self) -> Option<&Price> {
        self.price.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Departure of the first leg.
    pub fn departure(&self) -> Option<Timestamp> {
        self.legs.first().map(Leg::departure)
    }

    /// Arrival of the last leg.
    pub fn arrival(&self) -> Option<Timestamp> {
        self.legs.last().map(Leg::arrival)
    }

    /// Origin station of the first leg, if reported.
    pub fn origin(&self) -> Option<&Station> {
        self.legs.first().and_then(Leg::origin)
    }

    /// Destination station of the last leg, if reported.
    pub fn destination(&self) -> Option<&Station> {
        self.legs.last().and_then(Leg::destination)
    }

    /// Number of changes between rides (walks are not counted).
    pub fn change_count(&self) -> usize {
        self.legs
            .iter()
            .filter(|leg| !leg.is_walking())
            .count()
            .saturating_sub(1)
    }

    /// Ride legs, each annotated with the walking time to the next ride.
    ///
    /// Walking legs are dropped from the output; their duration is carried by
    /// the ride leg that precedes them.
    pub fn legs_with_transfers(&self) -> Vec<LegWithTransfer> {
        self.legs
            .iter()
            .enumerate()
            .filter(|(_, leg)| !leg.is_walking())
            .map(|(i, leg)| LegWithTransfer {
                leg: leg.clone(),
                transfer_time_after: self
                    .legs
                    .get(i + 1)
                    .map(Leg::transfer_minutes)
                    .unwrap_or(0),
            })
            .collect()
    }
}

/// A ride leg together with the walking transfer (in minutes) that follows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegWithTransfer {
    #[serde(flatten)]
    pub leg: Leg,
    pub transfer_time_after: i64,
}
