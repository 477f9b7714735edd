//! Split-ticket candidates and results.

use serde::Serialize;

use super::{Journey, Station, Timestamp};

/// Line information copied onto a candidate for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
}

/// A station the original train calls at, proposed as the boundary between
/// two separate tickets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitCandidate {
    pub station: Station,
    /// Scheduled departure of the train from this station. The second
    /// ticket's journey must depart at this time.
    pub departure: Timestamp,
    pub arrival: Timestamp,
    pub leg_index: usize,
    pub stop_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_line: Option<TrainLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_factor: Option<serde_json::Value>,
}

/// A cheaper (or partially priced) way of making the same trip on two tickets.
///
/// `segments[0]` ends at `split_stations[0]` and `segments[1]` starts there.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitResult {
    pub split_stations: Vec<Station>,
    pub segments: [Journey; 2],
}

impl SplitResult {
    /// A single-split result at `station`.
    pub fn single(station: Station, first: Journey, second: Journey) -> Self {
        Self {
            split_stations: vec![station],
            segments: [first, second],
        }
    }

    /// Combined fare of both tickets, if both are priced.
    pub fn total_price(&self) -> Option<f64> {
        let [first, second] = &self.segments;
        Some(first.price()?.amount() + second.price()?.amount())
    }
}
