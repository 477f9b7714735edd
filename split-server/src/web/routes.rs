//! HTTP route handlers.

use std::convert::Infallible;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use futures::{Stream, StreamExt, stream};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::booking::BookingResolver;
use crate::split::{
    AnalysisError, AnalysisEvent, CombinedAnalysis, JourneySearch, SplitAnalysis,
    find_booked_journeys,
};
use crate::vendo::convert_journey;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<S, R>(state: AppState<S, R>) -> Router
where
    S: JourneySearch + 'static,
    R: BookingResolver + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/analyze", post(analyze::<S, R>))
        .route("/api/combi", post(combi::<S, R>))
        .route("/api/journey", post(booked_journeys::<S, R>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a JSON body, logging it on failure.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "invalid request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Render one analysis item as an SSE event.
fn sse_event(item: Result<AnalysisEvent, AnalysisError>) -> Event {
    let (event, payload) = match item {
        Ok(event) => (Event::default(), serde_json::to_value(&event)),
        Err(err) => {
            warn!(error = %err, "analysis failed");
            (
                Event::default().event("error"),
                serde_json::to_value(ErrorEvent::from(&err)),
            )
        }
    };

    match payload {
        Ok(payload) => event.data(payload.to_string()),
        Err(e) => {
            error!(error = %e, "failed to serialize event");
            Event::default().event("error").data(
                serde_json::json!({ "error": "failed to serialize event" }).to_string(),
            )
        }
    }
}

/// Stream analysis events to the client as server-sent events.
fn sse_response<St>(events: St) -> Response
where
    St: Stream<Item = Result<AnalysisEvent, AnalysisError>> + Send + 'static,
{
    let stream = events.map(|item| Ok::<_, Infallible>(sse_event(item)));
    Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}

/// Analyze a journey supplied by the client.
async fn analyze<S, R>(State(state): State<AppState<S, R>>, body: Bytes) -> Result<Response, AppError>
where
    S: JourneySearch + 'static,
    R: BookingResolver + 'static,
{
    let req: AnalyzeRequest = parse_body(&body)?;
    let params = req.fare.to_params()?;
    let journey = convert_journey(&req.journey).map_err(|e| AppError::BadRequest {
        message: format!("Invalid journey: {e}"),
    })?;

    let events = match SplitAnalysis::new(
        state.search.clone(),
        state.config.as_ref().clone(),
        journey,
        params,
    ) {
        Ok(analysis) => analysis.into_stream().boxed(),
        Err(err) => stream::iter([Err(err)]).boxed(),
    };

    Ok(sse_response(events))
}

/// Analyze the connection behind a booking token.
async fn combi<S, R>(State(state): State<AppState<S, R>>, body: Bytes) -> Result<Response, AppError>
where
    S: JourneySearch + 'static,
    R: BookingResolver + 'static,
{
    let req: BookingRequest = parse_body(&body)?;
    let params = req.fare.to_params()?;

    let analysis = CombinedAnalysis::new(
        state.search.clone(),
        state.resolver.clone(),
        state.config.as_ref().clone(),
        req.vbid,
        params,
    );

    Ok(sse_response(analysis.into_stream()))
}

/// List the fare options of a booked connection.
async fn booked_journeys<S, R>(
    State(state): State<AppState<S, R>>,
    body: Bytes,
) -> Result<Json<BookedJourneysResponse>, AppError>
where
    S: JourneySearch + 'static,
    R: BookingResolver + 'static,
{
    let req: BookingRequest = parse_body(&body)?;
    let params = req.fare.to_params()?;

    let journeys = find_booked_journeys(
        state.search.as_ref(),
        state.resolver.as_ref(),
        &state.config,
        &req.vbid,
        &params,
    )
    .await?;

    Ok(Json(BookedJourneysResponse { journeys }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<AnalysisError> for AppError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::Resolution(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
