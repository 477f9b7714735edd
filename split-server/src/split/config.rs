//! Configuration for split-ticket analysis.

use chrono::Duration;

/// Tuning parameters for split analysis and the booked-journey lookup.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// How far (seconds) a returned journey's departure may be from the
    /// requested one and still count as the same train.
    pub match_tolerance_secs: i64,

    /// Journeys requested per sub-search when pricing a split.
    pub split_result_count: u8,

    /// Transfer limit for sub-searches when pricing a split.
    pub split_transfer_limit: Option<u8>,

    /// Journeys requested when looking up a booked connection.
    pub overview_result_count: u8,
}

impl AnalysisConfig {
    pub fn new(
        match_tolerance_secs: i64,
        split_result_count: u8,
        split_transfer_limit: Option<u8>,
        overview_result_count: u8,
    ) -> Self {
        Self {
            match_tolerance_secs,
            split_result_count,
            split_transfer_limit,
            overview_result_count,
        }
    }

    /// Returns the match tolerance as a Duration.
    pub fn match_tolerance(&self) -> Duration {
        Duration::seconds(self.match_tolerance_secs)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            match_tolerance_secs: 60,
            split_result_count: 1,
            split_transfer_limit: Some(3),
            overview_result_count: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AnalysisConfig::default();

        assert_eq!(config.match_tolerance_secs, 60);
        assert_eq!(config.split_result_count, 1);
        assert_eq!(config.split_transfer_limit, Some(3));
        assert_eq!(config.overview_result_count, 10);
    }

    #[test]
    fn duration_methods() {
        let config = AnalysisConfig::default();
        assert_eq!(config.match_tolerance(), Duration::seconds(60));
    }

    #[test]
    fn custom_config() {
        let config = AnalysisConfig::new(120, 3, None, 5);

        assert_eq!(config.match_tolerance(), Duration::minutes(2));
        assert_eq!(config.split_result_count, 3);
        assert_eq!(config.split_transfer_limit, None);
        assert_eq!(config.overview_result_count, 5);
    }
}
