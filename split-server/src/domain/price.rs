//! Fare prices.

use serde::Serialize;

use super::DomainError;

/// A fare as quoted by the journey search service.
///
/// A journey without a `Price` is unpriced, which is not the same as free.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Price {
    amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

impl Price {
    /// Create a price, rejecting negative or non-finite amounts.
    pub fn new(amount: f64) -> Result<Self, DomainError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::InvalidPrice(amount));
        }
        Ok(Self {
            amount,
            currency: None,
            hint: None,
        })
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_and_positive() {
        assert_eq!(Price::new(0.0).unwrap().amount(), 0.0);
        assert_eq!(Price::new(49.9).unwrap().amount(), 49.9);
    }

    #[test]
    fn rejects_negative_and_non_finite() {
        assert_eq!(Price::new(-0.01), Err(DomainError::InvalidPrice(-0.01)));
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(f64::INFINITY).is_err());
    }

    #[test]
    fn builder_sets_optional_fields() {
        let price = Price::new(19.9)
            .unwrap()
            .with_currency("EUR")
            .with_hint("Sparpreis");
        assert_eq!(price.currency(), Some("EUR"));
        assert_eq!(price.hint(), Some("Sparpreis"));
    }
}
