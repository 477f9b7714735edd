//! Journey leg types.
//!
//! A `Leg` is one continuous ride (or walk) between two points. Ride legs
//! carry the intermediate stops the vehicle makes as `Stopover`s.

use serde::Serialize;

use super::{DomainError, Station, Timestamp};

/// The line a leg runs on (e.g. "ICE 599").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

impl Line {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            product: None,
            product_name: None,
        }
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }
}

/// An intermediate halt within a leg where the passenger stays on board.
///
/// The service reports the leg's own endpoints as stopovers too; those have
/// no arrival (first) or no departure (last).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stopover {
    pub stop: Option<Station>,
    pub arrival: Option<Timestamp>,
    pub departure: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_factor: Option<serde_json::Value>,
}

impl Stopover {
    pub fn new(stop: Station, arrival: Option<Timestamp>, departure: Option<Timestamp>) -> Self {
        Self {
            stop: Some(stop),
            arrival,
            departure,
            load_factor: None,
        }
    }
}

/// One leg of a journey.
///
/// # Invariants
///
/// - `arrival >= departure`, checked at construction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    origin: Option<Station>,
    destination: Option<Station>,
    departure: Timestamp,
    arrival: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<Line>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    walking: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stopovers: Vec<Stopover>,
    #[serde(skip_serializing_if = "Option::is_none")]
    departure_platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    arrival_platform: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    cancelled: bool,
}

impl Leg {
    /// Construct a leg between two instants.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `arrival` is before `departure`.
    ///
    /// # Examples
    ///
    /// ```
    /// use split_server::domain::{Leg, Line, Station};
    /// use chrono::DateTime;
    ///
    /// let dep = DateTime::parse_from_rfc3339("2025-05-10T10:00:00+02:00").unwrap();
    /// let arr = DateTime::parse_from_rfc3339("2025-05-10T12:30:00+02:00").unwrap();
    ///
    /// let leg = Leg::new(dep, arr)
    ///     .unwrap()
    ///     .with_origin(Station::new("8000105", Some("Frankfurt(Main)Hbf")))
    ///     .with_destination(Station::new("8011160", Some("Berlin Hbf")))
    ///     .with_line(Line::new("ICE 599"));
    ///
    /// assert_eq!(leg.line_label(), Some("ICE 599"));
    /// assert!(Leg::new(arr, dep).is_err());
    /// ```
    pub fn new(departure: Timestamp, arrival: Timestamp) -> Result<Self, DomainError> {
        if arrival < departure {
            return Err(DomainError::InvalidLeg(
                "arrival must not be before departure",
            ));
        }

        Ok(Self {
            origin: None,
            destination: None,
            departure,
            arrival,
            line: None,
            walking: false,
            stopovers: Vec::new(),
            departure_platform: None,
            arrival_platform: None,
            cancelled: false,
        })
    }

    pub fn with_origin(mut self, origin: Station) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_destination(mut self, destination: Station) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn with_line(mut self, line: Line) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_stopovers(mut self, stopovers: Vec<Stopover>) -> Self {
        self.stopovers = stopovers;
        self
    }

    pub fn with_platforms(mut self, departure: Option<String>, arrival: Option<String>) -> Self {
        self.departure_platform = departure;
        self.arrival_platform = arrival;
        self
    }

    /// Mark this leg as a walk (transfer on foot).
    pub fn walking(mut self) -> Self {
        self.walking = true;
        self
    }

    pub fn cancelled(mut self, cancelled: bool) -> Self {
        self.cancelled = cancelled;
        self
    }

    pub fn origin(&self) -> Option<&Station> {
        self.origin.as_ref()
    }

    pub fn destination(&self) -> Option<&Station> {
        self.destination.as_ref()
    }

    pub fn departure(&self) -> Timestamp {
        self.departure
    }

    pub fn arrival(&self) -> Timestamp {
        self.arrival
    }

    pub fn line(&self) -> Option<&Line> {
        self.line.as_ref()
    }

    pub fn is_walking(&self) -> bool {
        self.walking
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn stopovers(&self) -> &[Stopover] {
        &self.stopovers
    }

    pub fn departure_platform(&self) -> Option<&str> {
        self.departure_platform.as_deref()
    }

    pub fn arrival_platform(&self) -> Option<&str> {
        self.arrival_platform.as_deref()
    }

    /// Label of the line for display.
    ///
    /// Walks have no label. Rides without line data are labelled "Unknown".
    pub fn line_label(&self) -> Option<&str> {
        if self.walking {
            return None;
        }
        let label = self.line.as_ref().and_then(|line| {
            if line.name.is_empty() {
                line.product.as_deref()
            } else {
                Some(line.name.as_str())
            }
        });
        Some(label.unwrap_or("Unknown"))
    }

    /// Minutes spent on this leg if it is a walking transfer, else 0.
    pub fn transfer_minutes(&self) -> i64 {
        if !self.walking {
            return 0;
        }
        let secs = self.arrival.signed_duration_since(self.departure).num_seconds();
        (secs as f64 / 60.0).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn at(s: &str) -> Timestamp {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn rejects_arrival_before_departure() {
        let result = Leg::new(at("2025-05-10T10:00:00+02:00"), at("2025-05-10T09:59:00+02:00"));
        assert!(matches!(result, Err(DomainError::InvalidLeg(_))));
    }

    #[test]
    fn zero_length_leg_is_valid() {
        let t = at("2025-05-10T10:00:00+02:00");
        assert!(Leg::new(t, t).is_ok());
    }

    #[test]
    fn instants_compare_across_offsets() {
        // 08:00Z and 10:00+02:00 are the same instant
        let leg = Leg::new(at("2025-05-10T10:00:00+02:00"), at("2025-05-10T08:00:00Z"));
        assert!(leg.is_ok());
    }

    #[test]
    fn line_label_variants() {
        let dep = at("2025-05-10T10:00:00+02:00");
        let arr = at("2025-05-10T10:30:00+02:00");

        let ride = Leg::new(dep, arr).unwrap().with_line(Line::new("RE 1"));
        assert_eq!(ride.line_label(), Some("RE 1"));

        let product_only = Leg::new(dep, arr)
            .unwrap()
            .with_line(Line::new("").with_product("regional"));
        assert_eq!(product_only.line_label(), Some("regional"));

        let unknown = Leg::new(dep, arr).unwrap();
        assert_eq!(unknown.line_label(), Some("Unknown"));

        let walk = Leg::new(dep, arr).unwrap().walking();
        assert_eq!(walk.line_label(), None);
    }

    #[test]
    fn transfer_minutes_only_for_walks() {
        let dep = at("2025-05-10T10:00:00+02:00");
        let arr = at("2025-05-10T10:07:40+02:00");

        let walk = Leg::new(dep, arr).unwrap().walking();
        assert_eq!(walk.transfer_minutes(), 8);

        let ride = Leg::new(dep, arr).unwrap();
        assert_eq!(ride.transfer_minutes(), 0);
    }

    #[test]
    fn serializes_camel_case_and_skips_defaults() {
        let leg = Leg::new(at("2025-05-10T10:00:00+02:00"), at("2025-05-10T10:30:00+02:00"))
            .unwrap()
            .with_platforms(Some("7".into()), None);
        let json = serde_json::to_value(&leg).unwrap();

        assert_eq!(json["departurePlatform"], "7");
        assert!(json.get("walking").is_none());
        assert!(json.get("stopovers").is_none());
        assert_eq!(json["departure"], "2025-05-10T10:00:00+02:00");
    }
}
