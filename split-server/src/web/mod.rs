//! Web layer for the split-ticket finder.
//!
//! Provides HTTP endpoints that stream split analyses as server-sent events
//! and list the fare options of a booked connection.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
