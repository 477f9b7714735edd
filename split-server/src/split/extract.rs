//! Split candidate extraction.
//!
//! Candidates come from the stopovers already present on the journey, so
//! this step never touches the network.

use crate::domain::{Journey, SplitCandidate, TrainLine};

/// Derive split candidates from a journey's own stopovers.
///
/// Scans ride legs in order, then each leg's stopovers in order, and emits a
/// candidate for every stopover that has a station and a scheduled departure
/// and is neither the journey's origin nor its final destination. The same
/// station reached on two legs yields two candidates.
///
/// A stopover without an arrival (the first stop of a leg) uses its departure
/// as the arrival.
pub fn extract_split_candidates(journey: &Journey) -> Vec<SplitCandidate> {
    let origin_id = journey.origin().map(|s| s.id.as_str());
    let destination_id = journey.destination().map(|s| s.id.as_str());

    let mut candidates = Vec::new();

    for (leg_index, leg) in journey.legs().iter().enumerate() {
        if leg.is_walking() {
            continue;
        }

        let train_line = leg.line().map(|line| TrainLine {
            name: Some(line.name.clone()),
            product: line.product.clone(),
        });

        for (stop_index, stopover) in leg.stopovers().iter().enumerate() {
            let Some(station) = &stopover.stop else {
                continue;
            };
            let Some(departure) = stopover.departure else {
                continue;
            };

            let id = Some(station.id.as_str());
            if id == origin_id || id == destination_id {
                continue;
            }

            candidates.push(SplitCandidate {
                station: station.clone(),
                departure,
                arrival: stopover.arrival.unwrap_or(departure),
                leg_index,
                stop_index,
                train_line: train_line.clone(),
                load_factor: stopover.load_factor.clone(),
            });
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Leg, Line, Station, Stopover, Timestamp};
    use chrono::DateTime;

    fn at(hhmm: &str) -> Timestamp {
        DateTime::parse_from_rfc3339(&format!("2025-05-10T{hhmm}:00+02:00")).unwrap()
    }

    fn station(id: &str) -> Station {
        Station::new(id, Some(format!("Station {id}")))
    }

    /// Stopovers as (station, arrival, departure); empty string means absent.
    fn leg_with_stops(from: &str, to: &str, stops: &[(&str, &str, &str)]) -> Leg {
        let stopovers: Vec<Stopover> = stops
            .iter()
            .map(|(id, arr, dep)| {
                Stopover::new(
                    station(id),
                    (!arr.is_empty()).then(|| at(arr)),
                    (!dep.is_empty()).then(|| at(dep)),
                )
            })
            .collect();

        let dep = stopovers.first().and_then(|s| s.departure).unwrap_or(at("10:00"));
        let arr = stopovers.last().and_then(|s| s.arrival).unwrap_or(at("12:00"));

        Leg::new(dep, arr)
            .unwrap()
            .with_origin(station(from))
            .with_destination(station(to))
            .with_line(Line::new("ICE 599").with_product("nationalExpress"))
            .with_stopovers(stopovers)
    }

    #[test]
    fn non_stop_leg_yields_nothing() {
        let leg = Leg::new(at("10:00"), at("12:00"))
            .unwrap()
            .with_origin(station("A"))
            .with_destination(station("D"));
        let journey = Journey::new(vec![leg]);

        assert!(extract_split_candidates(&journey).is_empty());
    }

    #[test]
    fn empty_journey_yields_nothing() {
        assert!(extract_split_candidates(&Journey::new(vec![])).is_empty());
    }

    #[test]
    fn intermediate_stops_become_candidates() {
        let journey = Journey::new(vec![leg_with_stops(
            "A",
            "D",
            &[
                ("A", "", "10:00"),
                ("B", "10:30", "10:32"),
                ("C", "11:00", "11:02"),
                ("D", "12:00", ""),
            ],
        )]);

        let candidates = extract_split_candidates(&journey);
        let ids: Vec<_> = candidates.iter().map(|c| c.station.id.as_str()).collect();
        assert_eq!(ids, ["B", "C"]);

        let b = &candidates[0];
        assert_eq!(b.departure, at("10:32"));
        assert_eq!(b.arrival, at("10:30"));
        assert_eq!(b.leg_index, 0);
        assert_eq!(b.stop_index, 1);
        assert_eq!(
            b.train_line,
            Some(TrainLine {
                name: Some("ICE 599".into()),
                product: Some("nationalExpress".into()),
            })
        );
        assert_eq!(candidates[1].stop_index, 2);
    }

    #[test]
    fn transfer_station_appears_once_and_walks_are_skipped() {
        // A -> B (change, short walk) B -> D
        let first = leg_with_stops("A", "B", &[("A", "", "10:00"), ("B", "10:40", "")]);
        let walk = Leg::new(at("10:40"), at("10:45"))
            .unwrap()
            .with_origin(station("B"))
            .with_destination(station("B"))
            .with_stopovers(vec![Stopover::new(station("W"), None, Some(at("10:41")))])
            .walking();
        let second = leg_with_stops(
            "B",
            "D",
            &[("B", "", "10:50"), ("C", "11:20", "11:22"), ("D", "12:00", "")],
        );
        let journey = Journey::new(vec![first, walk, second]);

        let candidates = extract_split_candidates(&journey);
        let ids: Vec<_> = candidates.iter().map(|c| c.station.id.as_str()).collect();
        assert_eq!(ids, ["B", "C"]);

        // B comes from the second leg's first stopover: no arrival, so it
        // falls back to the departure.
        assert_eq!(candidates[0].leg_index, 2);
        assert_eq!(candidates[0].stop_index, 0);
        assert_eq!(candidates[0].arrival, at("10:50"));
    }

    #[test]
    fn repeated_station_is_not_deduplicated() {
        let first = leg_with_stops(
            "A",
            "C",
            &[("A", "", "10:00"), ("B", "10:20", "10:21"), ("C", "10:40", "10:45")],
        );
        let second = leg_with_stops(
            "C",
            "D",
            &[("C", "", "10:50"), ("B", "11:10", "11:11"), ("D", "12:00", "")],
        );
        let journey = Journey::new(vec![first, second]);

        let candidates = extract_split_candidates(&journey);
        let b_count = candidates.iter().filter(|c| c.station.id == "B").count();
        assert_eq!(b_count, 2);
    }

    #[test]
    fn stopovers_without_station_or_departure_are_skipped() {
        let mut leg = leg_with_stops("A", "D", &[("A", "", "10:00"), ("B", "10:30", "")]);
        let mut stops = leg.stopovers().to_vec();
        stops.push(Stopover {
            stop: None,
            arrival: Some(at("10:50")),
            departure: Some(at("10:51")),
            load_factor: None,
        });
        leg = leg.with_stopovers(stops);

        assert!(extract_split_candidates(&Journey::new(vec![leg])).is_empty());
    }

    #[test]
    fn load_factor_is_carried_through() {
        let mut stop = Stopover::new(station("B"), Some(at("10:30")), Some(at("10:32")));
        stop.load_factor = Some(serde_json::json!("high"));
        let leg = Leg::new(at("10:00"), at("12:00"))
            .unwrap()
            .with_origin(station("A"))
            .with_destination(station("D"))
            .with_stopovers(vec![stop]);

        let candidates = extract_split_candidates(&Journey::new(vec![leg]));
        assert_eq!(candidates[0].load_factor, Some(serde_json::json!("high")));
        assert_eq!(candidates[0].train_line, None);
    }

    #[test]
    fn extraction_is_deterministic() {
        let journey = Journey::new(vec![leg_with_stops(
            "A",
            "D",
            &[("A", "", "10:00"), ("B", "10:30", "10:32"), ("D", "12:00", "")],
        )]);
        assert_eq!(
            extract_split_candidates(&journey),
            extract_split_candidates(&journey)
        );
    }
}
