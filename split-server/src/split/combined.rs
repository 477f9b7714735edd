//! Split analysis starting from a booking token.
//!
//! The booked connection is resolved, looked up again with the journey
//! search to get its stopovers and current fare, and then handed to
//! [`SplitAnalysis`].

use std::sync::Arc;

use futures::Stream;
use tracing::{info, warn};

use crate::booking::{BookingResolver, ResolvedBooking};
use crate::domain::Journey;

use super::analysis::{AnalysisError, AnalysisEvent, SplitAnalysis};
use super::closest::closest_departures;
use super::config::AnalysisConfig;
use super::dedupe::{deduplicate, sort_by_departure};
use super::options::AnalysisParams;
use super::search::{JourneySearch, SearchError};

/// Look up the fare options for a booked connection, deduplicated and in
/// departure order.
async fn booked_connection_options<S: JourneySearch>(
    client: &S,
    config: &AnalysisConfig,
    params: &AnalysisParams,
    booking: &ResolvedBooking,
) -> Result<Vec<Journey>, SearchError> {
    let options = params.search_options(config.overview_result_count, None, Some(booking.departure));
    let journeys = client
        .search(&booking.origin_id, &booking.destination_id, &options)
        .await?;

    let found = journeys.len();
    let journeys = sort_by_departure(deduplicate(journeys));
    info!(found, unique = journeys.len(), "looked up booked connection");

    Ok(journeys)
}

/// All fare options for the train a booking token refers to.
///
/// Returns every journey departing at the time closest to the booked one.
pub async fn find_booked_journeys<S: JourneySearch, R: BookingResolver>(
    client: &S,
    resolver: &R,
    config: &AnalysisConfig,
    token: &str,
    params: &AnalysisParams,
) -> Result<Vec<Journey>, AnalysisError> {
    let booking = resolver.resolve(token).await?;
    let journeys = booked_connection_options(client, config, params, &booking)
        .await
        .map_err(AnalysisError::Search)?;
    Ok(closest_departures(&journeys, booking.departure))
}

enum Stage<S> {
    Resolve,
    Lookup(ResolvedBooking),
    Split(Box<SplitAnalysis<S>>),
    /// A single final item, then done.
    Last(Option<Result<AnalysisEvent, AnalysisError>>),
    Finished,
}

/// An in-progress analysis of a booked connection.
///
/// Emits one `Journeys` event listing the fare options found for the
/// booking, followed by the events of a [`SplitAnalysis`] of the booked
/// train. A failure to resolve the token or to look up the connection ends
/// the run with that error as the only item.
pub struct CombinedAnalysis<S, R> {
    client: Arc<S>,
    resolver: Arc<R>,
    config: AnalysisConfig,
    params: AnalysisParams,
    token: String,
    stage: Stage<S>,
}

impl<S: JourneySearch, R: BookingResolver> CombinedAnalysis<S, R> {
    pub fn new(
        client: Arc<S>,
        resolver: Arc<R>,
        config: AnalysisConfig,
        token: impl Into<String>,
        params: AnalysisParams,
    ) -> Self {
        Self {
            client,
            resolver,
            config,
            params,
            token: token.into(),
            stage: Stage::Resolve,
        }
    }

    /// Perform the next step of the analysis.
    pub async fn advance(&mut self) -> Option<Result<AnalysisEvent, AnalysisError>> {
        loop {
            match &mut self.stage {
                Stage::Finished => return None,

                Stage::Resolve => match self.resolver.resolve(&self.token).await {
                    Ok(booking) => {
                        info!(
                            origin = %booking.origin_id,
                            destination = %booking.destination_id,
                            departure = %booking.departure,
                            "resolved booking"
                        );
                        self.stage = Stage::Lookup(booking);
                    }
                    Err(err) => {
                        warn!(error = %err, "booking resolution failed");
                        self.stage = Stage::Finished;
                        return Some(Err(err.into()));
                    }
                },

                Stage::Lookup(booking) => {
                    let booking = booking.clone();
                    let journeys = match booked_connection_options(
                        self.client.as_ref(),
                        &self.config,
                        &self.params,
                        &booking,
                    )
                    .await
                    {
                        Ok(journeys) => journeys,
                        Err(err) => {
                            warn!(error = %err, "booked connection lookup failed");
                            self.stage = Stage::Finished;
                            return Some(Err(AnalysisError::Search(err)));
                        }
                    };

                    let chosen = closest_departures(&journeys, booking.departure)
                        .into_iter()
                        .next();

                    self.stage = match chosen {
                        Some(journey) => match SplitAnalysis::new(
                            self.client.clone(),
                            self.config.clone(),
                            journey,
                            self.params,
                        ) {
                            Ok(analysis) => Stage::Split(Box::new(analysis)),
                            Err(err) => Stage::Last(Some(Err(err))),
                        },
                        None => Stage::Last(Some(Ok(AnalysisEvent::Complete {
                            split_options: Vec::new(),
                        }))),
                    };

                    return Some(Ok(AnalysisEvent::Journeys { journeys }));
                }

                Stage::Split(analysis) => {
                    let item = analysis.advance().await;
                    if item.is_none() {
                        self.stage = Stage::Finished;
                    }
                    return item;
                }

                Stage::Last(item) => {
                    let item = item.take();
                    self.stage = Stage::Finished;
                    return item;
                }
            }
        }
    }
}

impl<S: JourneySearch + 'static, R: BookingResolver + 'static> CombinedAnalysis<S, R> {
    /// Turn the analysis into a stream of events.
    pub fn into_stream(self) -> impl Stream<Item = Result<AnalysisEvent, AnalysisError>> + Send {
        futures::stream::unfold(self, |mut analysis| async move {
            let item = analysis.advance().await?;
            Some((item, analysis))
        })
    }
}
