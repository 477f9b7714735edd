//! Domain error types.
//!
//! These errors represent validation failures when constructing domain
//! values. They are distinct from API/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Invalid leg construction (e.g., arrival before departure)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// Price amount is negative or not a finite number
    #[error("invalid price amount: {0}")]
    InvalidPrice(f64),
}
