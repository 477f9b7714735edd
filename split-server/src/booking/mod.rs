//! Booking link resolution.
//!
//! A booking token (the `vbid` in a shared bahn.de link) identifies a priced
//! connection. Resolving it yields the route and the booked departure time,
//! which is enough to look the connection up again with the journey search.

mod client;
mod error;
mod recon;

use std::future::Future;
use std::sync::Arc;

use crate::domain::Timestamp;

pub use client::{BookingClient, BookingConfig, ConnectionResponse};
pub use error::ResolutionError;
pub use recon::{parse_booking_date, station_ids_from_recon};

/// Route and departure of a booked connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBooking {
    pub origin_id: String,
    pub destination_id: String,
    pub departure: Timestamp,
}

/// Trait for turning a booking token into a route.
pub trait BookingResolver: Send + Sync {
    fn resolve(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<ResolvedBooking, ResolutionError>> + Send;
}

impl<T: BookingResolver> BookingResolver for Arc<T> {
    fn resolve(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<ResolvedBooking, ResolutionError>> + Send {
        (**self).resolve(token)
    }
}
