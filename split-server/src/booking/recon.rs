//! Parsing of the booking service's connection payload.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use crate::domain::Timestamp;

use super::error::ResolutionError;

const STATION_MARKER: &str = "@L=";

/// Extract the origin and destination station ids from a reconstruction
/// string.
///
/// Stations appear as `@L=<digits>` tokens in travel order; the first is the
/// origin and the last the destination. Markers not followed by a digit are
/// ignored.
pub fn station_ids_from_recon(recon: &str) -> Result<(String, String), ResolutionError> {
    let mut ids = recon.match_indices(STATION_MARKER).filter_map(|(pos, _)| {
        let rest = &recon[pos + STATION_MARKER.len()..];
        let len = rest.bytes().take_while(u8::is_ascii_digit).count();
        (len > 0).then(|| &rest[..len])
    });

    let origin = ids.next().ok_or(ResolutionError::MissingStations)?;
    let destination = ids.last().unwrap_or(origin);

    Ok((origin.to_string(), destination.to_string()))
}

/// Parse the booked departure.
///
/// Accepts RFC 3339. A timestamp without an offset is taken to be in the
/// server's local time zone.
pub fn parse_booking_date(raw: &str) -> Result<Timestamp, ResolutionError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts);
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|e| ResolutionError::InvalidDate(format!("{raw}: {e}")))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|ts| ts.fixed_offset())
        .ok_or_else(|| ResolutionError::InvalidDate(format!("{raw}: not a valid local time")))
}
