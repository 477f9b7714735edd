//! Matching search results to a scheduled departure.

use chrono::Duration;

use crate::domain::{Journey, Timestamp};

/// Find the journey that departs at `target`, within `tolerance`.
///
/// Returns the *first* journey in the given order whose first leg departs no
/// more than `tolerance` away from `target`, which is not necessarily the
/// closest match. Journeys without legs never match.
pub fn match_departure<'a>(
    journeys: &'a [Journey],
    target: Timestamp,
    tolerance: Duration,
) -> Option<&'a Journey> {
    journeys.iter().find(|journey| {
        journey
            .departure()
            .is_some_and(|dep| (dep - target).abs() <= tolerance)
    })
}
