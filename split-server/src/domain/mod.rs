//! Domain types for the split-ticket finder.
//!
//! This module contains the journey model shared by the search client, the
//! split analysis and the web layer. Types that carry invariants enforce them
//! at construction time, so code that receives them can trust their validity.

mod error;
mod journey;
mod leg;
mod price;
mod split;
mod station;

pub use error::DomainError;
pub use journey::{Journey, LegWithTransfer};
pub use leg::{Leg, Line, Stopover};
pub use price::Price;
pub use split::{SplitCandidate, SplitResult, TrainLine};
pub use station::Station;

/// An absolute point in time, keeping the offset it was reported with.
///
/// Equality, ordering and hashing use the absolute instant.
pub type Timestamp = chrono::DateTime<chrono::FixedOffset>;
