//! Picking the booked train out of a sorted result list.

use crate::domain::{Journey, Timestamp};

/// Select the journeys departing closest to `target`.
///
/// Scans left to right keeping the journey with the smallest absolute
/// departure difference; a later journey only replaces the current best when
/// strictly closer, so ties favour the earlier one. Returns every journey
/// whose departure equals the best one's, which keeps all fare options for
/// the same train.
///
/// Intended for output of [`sort_by_departure`](super::sort_by_departure).
/// Journeys without legs are ignored.
pub fn closest_departures(journeys: &[Journey], target: Timestamp) -> Vec<Journey> {
    let mut best: Option<(Timestamp, chrono::Duration)> = None;

    for departure in journeys.iter().filter_map(Journey::departure) {
        let diff = (departure - target).abs();
        if best.is_none_or(|(_, best_diff)| diff < best_diff) {
            best = Some((departure, diff));
        }
    }

    let Some((best_departure, _)) = best else {
        return Vec::new();
    };

    journeys
        .iter()
        .filter(|journey| journey.departure() == Some(best_departure))
        .cloned()
        .collect()
}
