//! Fare preferences and per-request search options.

use serde::Serialize;

use crate::domain::Timestamp;

/// Travel class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FareClass {
    First,
    Second,
}

impl FareClass {
    /// Parse the numeric class used by callers (1 or 2).
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(FareClass::First),
            2 => Some(FareClass::Second),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            FareClass::First => 1,
            FareClass::Second => 2,
        }
    }
}

/// Discount-card reduction tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiscountTier {
    Percent25,
    Percent50,
    Percent100,
}

impl DiscountTier {
    /// Parse a tier from its percentage. Only 25, 50 and 100 exist.
    pub fn from_percent(percent: i64) -> Option<Self> {
        match percent {
            25 => Some(DiscountTier::Percent25),
            50 => Some(DiscountTier::Percent50),
            100 => Some(DiscountTier::Percent100),
            _ => None,
        }
    }

    pub fn percent(self) -> u8 {
        match self {
            DiscountTier::Percent25 => 25,
            DiscountTier::Percent50 => 50,
            DiscountTier::Percent100 => 100,
        }
    }
}

/// A discount card held by the passenger, valid for one travel class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DiscountCard {
    pub tier: DiscountTier,
    pub fare_class: FareClass,
}

/// Options for a single journey search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// How many journeys to ask for.
    pub result_count: u8,
    pub include_stopovers: bool,
    pub fare_class: FareClass,
    /// Maximum number of transfers; `None` lets the service decide.
    pub transfer_limit: Option<u8>,
    pub passenger_age: Option<u8>,
    pub discount_card: Option<DiscountCard>,
    /// Flat-rate regional ticket held by the passenger.
    pub regional_ticket_discount: bool,
    pub target_departure: Option<Timestamp>,
}

impl SearchOptions {
    /// The same options aimed at a different departure time.
    pub fn departing_at(&self, departure: Timestamp) -> Self {
        Self {
            target_departure: Some(departure),
            ..self.clone()
        }
    }
}

/// Caller-supplied fare parameters, shared by both entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisParams {
    pub travel_class: FareClass,
    pub passenger_age: Option<u8>,
    pub discount_tier: Option<DiscountTier>,
    pub regional_ticket_discount: bool,
}

impl AnalysisParams {
    pub fn new(travel_class: FareClass) -> Self {
        Self {
            travel_class,
            passenger_age: None,
            discount_tier: None,
            regional_ticket_discount: false,
        }
    }

    pub fn with_passenger_age(mut self, age: u8) -> Self {
        self.passenger_age = Some(age);
        self
    }

    pub fn with_discount_tier(mut self, tier: DiscountTier) -> Self {
        self.discount_tier = Some(tier);
        self
    }

    pub fn with_regional_ticket(mut self, enabled: bool) -> Self {
        self.regional_ticket_discount = enabled;
        self
    }

    /// The discount card implied by these parameters. The card is valid in
    /// the chosen travel class.
    pub fn discount_card(&self) -> Option<DiscountCard> {
        self.discount_tier.map(|tier| DiscountCard {
            tier,
            fare_class: self.travel_class,
        })
    }

    /// Search options with the caller's fare preferences applied.
    pub fn search_options(
        &self,
        result_count: u8,
        transfer_limit: Option<u8>,
        target_departure: Option<Timestamp>,
    ) -> SearchOptions {
        SearchOptions {
            result_count,
            include_stopovers: true,
            fare_class: self.travel_class,
            transfer_limit,
            passenger_age: self.passenger_age,
            discount_card: self.discount_card(),
            regional_ticket_discount: self.regional_ticket_discount,
            target_departure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn fare_class_numbers() {
        assert_eq!(FareClass::from_number(1), Some(FareClass::First));
        assert_eq!(FareClass::from_number(2), Some(FareClass::Second));
        assert_eq!(FareClass::from_number(0), None);
        assert_eq!(FareClass::from_number(3), None);
        assert_eq!(FareClass::First.number(), 1);
    }

    #[test]
    fn only_known_discount_tiers_parse() {
        assert_eq!(DiscountTier::from_percent(25), Some(DiscountTier::Percent25));
        assert_eq!(DiscountTier::from_percent(50), Some(DiscountTier::Percent50));
        assert_eq!(DiscountTier::from_percent(100), Some(DiscountTier::Percent100));
        assert_eq!(DiscountTier::from_percent(75), None);
        assert_eq!(DiscountTier::from_percent(0), None);
    }

    #[test]
    fn discount_card_follows_travel_class() {
        let params = AnalysisParams::new(FareClass::First).with_discount_tier(DiscountTier::Percent50);
        assert_eq!(
            params.discount_card(),
            Some(DiscountCard {
                tier: DiscountTier::Percent50,
                fare_class: FareClass::First,
            })
        );
        assert_eq!(AnalysisParams::new(FareClass::Second).discount_card(), None);
    }

    #[test]
    fn search_options_carry_params() {
        let params = AnalysisParams::new(FareClass::Second)
            .with_passenger_age(27)
            .with_regional_ticket(true);
        let options = params.search_options(1, Some(3), None);

        assert_eq!(options.result_count, 1);
        assert!(options.include_stopovers);
        assert_eq!(options.transfer_limit, Some(3));
        assert_eq!(options.passenger_age, Some(27));
        assert!(options.regional_ticket_discount);
        assert_eq!(options.target_departure, None);

        let dep = DateTime::parse_from_rfc3339("2025-05-10T10:00:00+02:00").unwrap();
        let retargeted = options.departing_at(dep);
        assert_eq!(retargeted.target_departure, Some(dep));
        assert_eq!(retargeted.passenger_age, Some(27));
    }
}
