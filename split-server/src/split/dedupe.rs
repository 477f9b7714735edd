//! Journey deduplication and ordering.
//!
//! The search service frequently returns the same itinerary more than once
//! (e.g. once per fare option with identical prices). These helpers reduce a
//! raw result list to unique itineraries in departure order.

use std::collections::HashSet;

use crate::domain::{Journey, Timestamp};

/// Composite signature of one leg: line name (`None` for walks and unnamed
/// lines), origin id, destination id and departure instant.
type LegSignature = (Option<String>, Option<String>, Option<String>, Timestamp);

/// Composite signature of a journey: its legs plus the price amount bits
/// (`None` when unpriced).
type JourneySignature = (Vec<LegSignature>, Option<u64>);

fn signature(journey: &Journey) -> JourneySignature {
    let legs = journey
        .legs()
        .iter()
        .map(|leg| {
            (
                leg.line()
                    .map(|line| line.name.clone())
                    .filter(|name| !name.is_empty()),
                leg.origin().map(|s| s.id.clone()),
                leg.destination().map(|s| s.id.clone()),
                leg.departure(),
            )
        })
        .collect();
    let price = journey.price().map(|p| p.amount().to_bits());
    (legs, price)
}

/// Remove duplicate itineraries, keeping the first occurrence of each.
///
/// Journeys with no legs are dropped. Two journeys are duplicates when every
/// leg has the same line, origin, destination and departure, and the price
/// amount is the same (or both are unpriced).
pub fn deduplicate(journeys: Vec<Journey>) -> Vec<Journey> {
    let mut seen: HashSet<JourneySignature> = HashSet::with_capacity(journeys.len());

    journeys
        .into_iter()
        .filter(|journey| !journey.is_empty())
        .filter(|journey| seen.insert(signature(journey)))
        .collect()
}

/// Sort journeys by first-leg departure, earliest first.
///
/// The sort is stable, so journeys departing together keep their order.
/// Empty journeys sort first.
pub fn sort_by_departure(mut journeys: Vec<Journey>) -> Vec<Journey> {
    journeys.sort_by_key(Journey::departure);
    journeys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Leg, Line, Price, Station};
    use chrono::{DateTime, Duration};

    fn at(hhmm: &str) -> Timestamp {
        DateTime::parse_from_rfc3339(&format!("2025-05-10T{hhmm}:00+02:00")).unwrap()
    }

    fn journey(line: Option<&str>, dep: &str, price: Option<f64>) -> Journey {
        let mut leg = Leg::new(at(dep), at(dep) + Duration::hours(1))
            .unwrap()
            .with_origin(Station::new("A", None::<String>))
            .with_destination(Station::new("B", None::<String>));
        if let Some(name) = line {
            leg = leg.with_line(Line::new(name));
        }
        let journey = Journey::new(vec![leg]);
        match price {
            Some(amount) => journey.with_price(Price::new(amount).unwrap()),
            None => journey,
        }
    }

    #[test]
    fn drops_empty_journeys() {
        let result = deduplicate(vec![Journey::new(vec![]), Journey::new(vec![])]);
        assert!(result.is_empty());
    }

    #[test]
    fn keeps_first_of_identical() {
        let a = journey(Some("ICE 1"), "10:00", Some(49.9));
        let b = journey(Some("ICE 3"), "10:00", Some(49.9));
        let result = deduplicate(vec![a.clone(), b.clone(), a.clone()]);
        assert_eq!(result, vec![a, b]);
    }

    #[test]
    fn price_is_part_of_signature() {
        let cheap = journey(Some("ICE 1"), "10:00", Some(29.9));
        let flex = journey(Some("ICE 1"), "10:00", Some(89.9));
        let unpriced = journey(Some("ICE 1"), "10:00", None);
        let result = deduplicate(vec![cheap, flex, unpriced.clone(), unpriced]);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn unnamed_lines_count_as_walks() {
        let walk = journey(None, "10:00", None);
        let blank = journey(Some(""), "10:00", None);
        let result = deduplicate(vec![walk.clone(), blank]);
        assert_eq!(result, vec![walk]);
    }

    #[test]
    fn sort_is_stable_by_departure() {
        let late = journey(Some("ICE 5"), "12:00", None);
        let early_a = journey(Some("ICE 1"), "10:00", Some(1.0));
        let early_b = journey(Some("ICE 2"), "10:00", Some(2.0));
        let sorted = sort_by_departure(vec![late.clone(), early_a.clone(), early_b.clone()]);
        assert_eq!(sorted, vec![early_a, early_b, late]);
    }
}
