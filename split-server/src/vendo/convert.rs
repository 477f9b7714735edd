//! Conversion from journey search DTOs to domain types.
//!
//! Validates the shape the split analysis relies on: every leg has parseable
//! departure and arrival times, referenced places have ids, and prices are
//! valid amounts.

use chrono::DateTime;
use serde_json::Value;

use crate::domain::{DomainError, Journey, Leg, Line, Price, Station, Stopover, Timestamp};

use super::types::{JourneyDto, LegDto, LineDto, PlaceDto, PriceDto, StopoverDto};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Failed to parse a timestamp
    #[error("invalid time: {0}")]
    InvalidTime(String),

    /// The values are present but inconsistent
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Convert a list of journeys, failing on the first invalid one.
pub fn convert_journeys(dtos: &[JourneyDto]) -> Result<Vec<Journey>, ConversionError> {
    dtos.iter().map(convert_journey).collect()
}

/// Convert a single journey.
pub fn convert_journey(dto: &JourneyDto) -> Result<Journey, ConversionError> {
    let legs = dto
        .legs
        .iter()
        .map(convert_leg)
        .collect::<Result<Vec<_>, _>>()?;

    let journey = Journey::new(legs);
    match &dto.price {
        Some(price) => Ok(journey.with_price(convert_price(price)?)),
        None => Ok(journey),
    }
}

fn convert_price(dto: &PriceDto) -> Result<Price, ConversionError> {
    let mut price = Price::new(dto.amount)?;
    if let Some(currency) = &dto.currency {
        price = price.with_currency(currency);
    }
    if let Some(hint) = &dto.hint {
        price = price.with_hint(hint);
    }
    Ok(price)
}

fn convert_leg(dto: &LegDto) -> Result<Leg, ConversionError> {
    let departure = parse_time(dto.departure.as_deref(), "leg.departure")?;
    let arrival = parse_time(dto.arrival.as_deref(), "leg.arrival")?;

    let mut leg = Leg::new(departure, arrival)?
        .with_platforms(dto.departure_platform.clone(), dto.arrival_platform.clone())
        .cancelled(dto.cancelled.unwrap_or(false));

    if let Some(origin) = &dto.origin {
        leg = leg.with_origin(convert_place(origin, "leg.origin.id")?);
    }
    if let Some(destination) = &dto.destination {
        leg = leg.with_destination(convert_place(destination, "leg.destination.id")?);
    }
    if let Some(line) = dto.line.as_ref().map(convert_line).transpose()? {
        leg = leg.with_line(line);
    }
    if let Some(stopovers) = &dto.stopovers {
        let stopovers = stopovers
            .iter()
            .map(convert_stopover)
            .collect::<Result<Vec<_>, _>>()?;
        leg = leg.with_stopovers(stopovers);
    }
    if dto.walking.as_ref().is_some_and(is_truthy) {
        leg = leg.walking();
    }

    Ok(leg)
}

fn convert_line(dto: &LineDto) -> Result<Line, ConversionError> {
    let name = dto
        .name
        .clone()
        .ok_or(ConversionError::MissingField("leg.line.name"))?;
    Ok(Line {
        name,
        product: dto.product.clone(),
        product_name: dto.product_name.clone(),
    })
}

fn convert_stopover(dto: &StopoverDto) -> Result<Stopover, ConversionError> {
    Ok(Stopover {
        stop: dto
            .stop
            .as_ref()
            .map(|stop| convert_place(stop, "stopover.stop.id"))
            .transpose()?,
        arrival: parse_optional_time(dto.arrival.as_deref())?,
        departure: parse_optional_time(dto.departure.as_deref())?,
        load_factor: dto.load_factor.clone(),
    })
}

fn convert_place(dto: &PlaceDto, field: &'static str) -> Result<Station, ConversionError> {
    let id = dto.id.clone().ok_or(ConversionError::MissingField(field))?;
    Ok(Station::new(id, dto.name.clone()))
}

fn parse_time(raw: Option<&str>, field: &'static str) -> Result<Timestamp, ConversionError> {
    let raw = raw.ok_or(ConversionError::MissingField(field))?;
    DateTime::parse_from_rfc3339(raw).map_err(|_| ConversionError::InvalidTime(raw.to_string()))
}

fn parse_optional_time(raw: Option<&str>) -> Result<Option<Timestamp>, ConversionError> {
    raw.map(|raw| {
        DateTime::parse_from_rfc3339(raw).map_err(|_| ConversionError::InvalidTime(raw.to_string()))
    })
    .transpose()
}

/// JSON truthiness: `null`, `false`, `0` and `""` are false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn journey(value: Value) -> Result<Journey, ConversionError> {
        let dto: JourneyDto = serde_json::from_value(value).unwrap();
        convert_journey(&dto)
    }

    fn ride_leg() -> Value {
        json!({
            "origin": {"id": "8000105", "name": "Frankfurt(Main)Hbf"},
            "destination": {"id": "8000261", "name": "München Hbf"},
            "departure": "2025-05-10T10:00:00+02:00",
            "arrival": "2025-05-10T13:30:00+02:00",
            "line": {"name": "ICE 599", "product": "nationalExpress", "productName": "ICE"},
            "departurePlatform": "9",
            "stopovers": [
                {"stop": {"id": "8000105"}, "arrival": null, "departure": "2025-05-10T10:00:00+02:00"},
                {"stop": {"id": "8000096", "name": "Stuttgart Hbf"},
                 "arrival": "2025-05-10T11:20:00+02:00", "departure": "2025-05-10T11:25:00+02:00",
                 "loadFactor": "low-to-medium"},
                {"stop": {"id": "8000261"}, "arrival": "2025-05-10T13:30:00+02:00"}
            ]
        })
    }

    #[test]
    fn converts_ride_leg() {
        let journey = journey(json!({
            "legs": [ride_leg()],
            "price": {"amount": 79.9, "currency": "EUR", "hint": null}
        }))
        .unwrap();

        let leg = &journey.legs()[0];
        assert_eq!(leg.origin().unwrap().id, "8000105");
        assert_eq!(leg.line().unwrap().product_name.as_deref(), Some("ICE"));
        assert_eq!(leg.departure_platform(), Some("9"));
        assert!(!leg.is_walking());

        let stopovers = leg.stopovers();
        assert_eq!(stopovers.len(), 3);
        assert_eq!(stopovers[0].arrival, None);
        assert_eq!(stopovers[1].stop.as_ref().unwrap().display_name(), "Stuttgart Hbf");
        assert_eq!(stopovers[1].load_factor, Some(json!("low-to-medium")));
        assert_eq!(stopovers[2].departure, None);

        let price = journey.price().unwrap();
        assert_eq!(price.amount(), 79.9);
        assert_eq!(price.currency(), Some("EUR"));
        assert_eq!(price.hint(), None);
    }

    #[test]
    fn walking_uses_truthiness() {
        for (value, expected) in [
            (json!(true), true),
            (json!(1), true),
            (json!("yes"), true),
            (json!({}), true),
            (json!(false), false),
            (json!(0), false),
            (json!(""), false),
            (Value::Null, false),
        ] {
            let journey = journey(json!({
                "legs": [{
                    "departure": "2025-05-10T10:00:00+02:00",
                    "arrival": "2025-05-10T10:05:00+02:00",
                    "walking": value.clone(),
                }]
            }))
            .unwrap();
            assert_eq!(journey.legs()[0].is_walking(), expected, "walking: {value}");
        }
    }

    #[test]
    fn missing_leg_times_are_rejected() {
        let err = journey(json!({"legs": [{"arrival": "2025-05-10T10:05:00+02:00"}]})).unwrap_err();
        assert_eq!(err, ConversionError::MissingField("leg.departure"));

        let err = journey(json!({"legs": [{
            "departure": "10:00",
            "arrival": "2025-05-10T10:05:00+02:00"
        }]}))
        .unwrap_err();
        assert_eq!(err, ConversionError::InvalidTime("10:00".into()));
    }

    #[test]
    fn inconsistent_values_are_rejected() {
        let backwards = journey(json!({"legs": [{
            "departure": "2025-05-10T10:05:00+02:00",
            "arrival": "2025-05-10T10:00:00+02:00"
        }]}));
        assert!(matches!(backwards, Err(ConversionError::Domain(_))));

        let negative = journey(json!({"legs": [], "price": {"amount": -1.0}}));
        assert!(matches!(negative, Err(ConversionError::Domain(_))));
    }

    #[test]
    fn places_need_ids() {
        let mut leg = ride_leg();
        leg["destination"] = json!({"name": "Somewhere"});
        let err = journey(json!({"legs": [leg]})).unwrap_err();
        assert_eq!(err, ConversionError::MissingField("leg.destination.id"));
    }

    #[test]
    fn empty_journey_is_valid() {
        let journey = journey(json!({"legs": []})).unwrap();
        assert!(journey.is_empty());
        assert!(journey.price().is_none());
    }

    #[test]
    fn domain_journey_round_trips_through_dto() {
        let original = journey(json!({"legs": [ride_leg()], "price": {"amount": 10.0}})).unwrap();
        let dto: JourneyDto = serde_json::from_value(serde_json::to_value(&original).unwrap()).unwrap();
        assert_eq!(convert_journey(&dto).unwrap(), original);
    }
}
