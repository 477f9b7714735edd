//! Split-ticket analysis.
//!
//! Given a priced journey, looks for a station along the route where buying
//! two tickets (origin to station, station to destination) for the very same
//! trains is cheaper than the through fare.
//!
//! The analysis never talks to a timetable directly: all lookups go through
//! the [`JourneySearch`] trait so that it can be driven by the live client,
//! the file-backed mock, or a scripted fake.

mod analysis;
mod closest;
mod combined;
mod config;
mod dedupe;
mod extract;
mod matcher;
mod options;
mod search;

pub use analysis::{AnalysisError, AnalysisEvent, SplitAnalysis};
pub use closest::closest_departures;
pub use combined::{CombinedAnalysis, find_booked_journeys};
pub use config::AnalysisConfig;
pub use dedupe::{deduplicate, sort_by_departure};
pub use extract::extract_split_candidates;
pub use matcher::match_departure;
pub use options::{AnalysisParams, DiscountCard, DiscountTier, FareClass, SearchOptions};
pub use search::{JourneySearch, SearchError};
