//! Split-ticket analysis of a single journey.
//!
//! [`SplitAnalysis`] walks the journey's split candidates one at a time. For
//! each candidate it prices the two halves of the trip separately, checks that
//! both halves are served by the same trains as the original, and records the
//! split when it is cheaper. Progress is reported as a sequence of
//! [`AnalysisEvent`]s so callers can stream it.

use std::sync::Arc;

use futures::Stream;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::booking::ResolutionError;
use crate::domain::{Journey, SplitCandidate, SplitResult, Station, Timestamp};

use super::config::AnalysisConfig;
use super::extract::extract_split_candidates;
use super::matcher::match_departure;
use super::options::AnalysisParams;
use super::search::{JourneySearch, SearchError};

/// One step of progress reported by an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum AnalysisEvent {
    /// About to price the split at candidate `checked` of `total`.
    Processing {
        checked: usize,
        current_station: Option<String>,
        total: usize,
    },

    /// Fare options found for a booked connection.
    Journeys { journeys: Vec<Journey> },

    /// All candidates were priced. Always the last event of a successful run.
    Complete { split_options: Vec<SplitResult> },
}

/// Error that ends an analysis run.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The booking token could not be turned into a route.
    #[error("could not resolve booking: {0}")]
    Resolution(#[from] ResolutionError),

    /// Searching for the booked connection failed.
    #[error("could not look up the booked connection: {0}")]
    Search(#[source] SearchError),

    /// Pricing one of the halves of a split failed.
    #[error("failed to price split at {station}: {source}")]
    CandidateFetch {
        station: Station,
        #[source]
        source: SearchError,
    },

    /// The journey has split candidates but no origin or destination station.
    #[error("journey has no origin or destination station")]
    MissingEndpoint,
}

impl AnalysisError {
    /// The station being priced when the run failed, if any.
    pub fn station(&self) -> Option<&Station> {
        match self {
            AnalysisError::CandidateFetch { station, .. } => Some(station),
            _ => None,
        }
    }
}

/// Where the original journey starts and ends.
#[derive(Debug, Clone)]
struct Route {
    origin_id: String,
    destination_id: String,
    departure: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Report that candidate `i` is next (or completion, past the end).
    Announce(usize),
    /// Price candidate `i`.
    Evaluate(usize),
    Finished,
    Failed,
}

/// An in-progress split analysis.
///
/// Each call to [`advance`](Self::advance) performs one step and returns at
/// most one event; the run is over once it returns `None`. Candidates are
/// priced strictly in order with at most two searches in flight. Dropping an
/// unfinished `advance` future cancels both searches of the current
/// candidate, which is then priced again from scratch on the next call.
pub struct SplitAnalysis<S> {
    client: Arc<S>,
    config: AnalysisConfig,
    params: AnalysisParams,
    route: Option<Route>,
    original_price: f64,
    candidates: Vec<SplitCandidate>,
    split_options: Vec<SplitResult>,
    phase: Phase,
}

impl<S: JourneySearch> SplitAnalysis<S> {
    /// Prepare an analysis of `journey`.
    ///
    /// Fails with [`AnalysisError::MissingEndpoint`] when the journey has
    /// candidates but its origin or destination station is unknown.
    pub fn new(
        client: Arc<S>,
        config: AnalysisConfig,
        journey: Journey,
        params: AnalysisParams,
    ) -> Result<Self, AnalysisError> {
        let candidates = extract_split_candidates(&journey);

        let route = match (journey.origin(), journey.destination(), journey.departure()) {
            (Some(origin), Some(destination), Some(departure)) => Some(Route {
                origin_id: origin.id.clone(),
                destination_id: destination.id.clone(),
                departure,
            }),
            _ if candidates.is_empty() => None,
            _ => return Err(AnalysisError::MissingEndpoint),
        };

        let original_price = journey.price().map_or(0.0, |price| price.amount());

        info!(
            candidates = candidates.len(),
            original_price, "starting split analysis"
        );

        Ok(Self {
            client,
            config,
            params,
            route,
            original_price,
            candidates,
            split_options: Vec::new(),
            phase: Phase::Announce(0),
        })
    }

    /// Candidates this run will price, in order.
    pub fn candidates(&self) -> &[SplitCandidate] {
        &self.candidates
    }

    /// Perform the next step of the analysis.
    pub async fn advance(&mut self) -> Option<Result<AnalysisEvent, AnalysisError>> {
        loop {
            match self.phase {
                Phase::Finished | Phase::Failed => return None,

                Phase::Announce(i) => {
                    let total = self.candidates.len();
                    let Some(candidate) = self.candidates.get(i) else {
                        info!(found = self.split_options.len(), "split analysis complete");
                        self.phase = Phase::Finished;
                        return Some(Ok(AnalysisEvent::Complete {
                            split_options: std::mem::take(&mut self.split_options),
                        }));
                    };
                    let current_station = candidate.station.name.clone();
                    self.phase = Phase::Evaluate(i);
                    return Some(Ok(AnalysisEvent::Processing {
                        checked: i,
                        current_station,
                        total,
                    }));
                }

                Phase::Evaluate(i) => match self.evaluate(i).await {
                    Ok(found) => {
                        self.split_options.extend(found);
                        self.phase = Phase::Announce(i + 1);
                    }
                    Err(err) => {
                        self.phase = Phase::Failed;
                        return Some(Err(err));
                    }
                },
            }
        }
    }

    /// Price the split at candidate `i`.
    async fn evaluate(&self, i: usize) -> Result<Option<SplitResult>, AnalysisError> {
        let (Some(candidate), Some(route)) = (self.candidates.get(i), self.route.as_ref()) else {
            return Err(AnalysisError::MissingEndpoint);
        };
        let station = &candidate.station;

        let first_options = self.params.search_options(
            self.config.split_result_count,
            self.config.split_transfer_limit,
            Some(route.departure),
        );
        let second_options = first_options.departing_at(candidate.departure);

        debug!(station = %station.id, "pricing split");

        let (to_split, from_split) = tokio::try_join!(
            self.client
                .search(&route.origin_id, &station.id, &first_options),
            self.client
                .search(&station.id, &route.destination_id, &second_options),
        )
        .map_err(|source| {
            warn!(station = %station.id, error = %source, "split search failed");
            AnalysisError::CandidateFetch {
                station: station.clone(),
                source,
            }
        })?;

        let tolerance = self.config.match_tolerance();
        let first = match_departure(&to_split, route.departure, tolerance);
        let second = match_departure(&from_split, candidate.departure, tolerance);

        let (Some(first), Some(second)) = (first, second) else {
            debug!(station = %station.id, "no matching train for one half");
            return Ok(None);
        };

        let record = match (first.price(), second.price()) {
            (Some(a), Some(b)) => a.amount() + b.amount() < self.original_price,
            (None, None) => false,
            // One half priced: reported so the caller can check the other half.
            _ => true,
        };

        if !record {
            debug!(station = %station.id, "split is not cheaper");
            return Ok(None);
        }

        let split = SplitResult::single(station.clone(), first.clone(), second.clone());
        info!(station = %station.id, total = ?split.total_price(), "found split");
        Ok(Some(split))
    }
}

impl<S: JourneySearch + 'static> SplitAnalysis<S> {
    /// Turn the analysis into a stream of events.
    pub fn into_stream(self) -> impl Stream<Item = Result<AnalysisEvent, AnalysisError>> + Send {
        futures::stream::unfold(self, |mut analysis| async move {
            let item = analysis.advance().await?;
            Some((item, analysis))
        })
    }
}

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod tests;
