//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ProblemError, RoutingError};
use crate::models::CostRates;
use crate::speed::SpeedRange;

/// Parameters of a routing run.
///
/// Missing JSON fields take their defaults.
///
/// # Examples
///
/// ```
/// use emergency_routing::config::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "time_limit_secs": 5.0, "seed": 42 }"#).unwrap();
/// assert_eq!(config.time_limit().as_secs(), 5);
/// assert_eq!(config.seed, Some(42));
/// assert_eq!(config.speed_range.r_max(), 70.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Wall-clock budget per solve, in seconds.
    pub time_limit_secs: f64,
    /// Required-speed range in km/h.
    pub speed_range: SpeedRange,
    /// Hourly cost rate per severity.
    pub cost_rates: CostRates,
    /// Seed for required-speed sampling; `None` seeds from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: 60.0,
            speed_range: SpeedRange::default(),
            cost_rates: CostRates::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Sets the solve time budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_secs = limit.as_secs_f64();
        self
    }

    /// Sets the required-speed range.
    pub fn with_speed_range(mut self, range: SpeedRange) -> Self {
        self.speed_range = range;
        self
    }

    /// Sets the severity cost rates.
    pub fn with_cost_rates(mut self, rates: CostRates) -> Self {
        self.cost_rates = rates;
        self
    }

    /// Fixes the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Time budget as a [`Duration`].
    ///
    /// Call [`validate`](Self::validate) first; invalid values saturate.
    pub fn time_limit(&self) -> Duration {
        Duration::try_from_secs_f64(self.time_limit_secs).unwrap_or(Duration::MAX)
    }

    /// Checks every parameter.
    pub fn validate(&self) -> Result<(), ProblemError> {
        if !self.time_limit_secs.is_finite() || self.time_limit_secs <= 0.0 {
            return Err(ProblemError::InvalidTimeLimit(self.time_limit_secs));
        }
        self.speed_range.validate()?;
        self.cost_rates.validate()
    }

    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self, RoutingError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    #[test]
    fn test_defaults() {
        let c = EngineConfig::default();
        assert_eq!(c.time_limit(), Duration::from_secs(60));
        assert_eq!(c.speed_range, SpeedRange::default());
        assert_eq!(c.cost_rates.rate(Severity::Critical), 500.0);
        assert!(c.seed.is_none());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let c = EngineConfig::default()
            .with_time_limit(Duration::from_millis(1500))
            .with_speed_range(SpeedRange::new(20.0, 50.0).expect("valid"))
            .with_cost_rates(CostRates::new(1.0, 2.0, 3.0))
            .with_seed(9);
        assert_eq!(c.time_limit(), Duration::from_millis(1500));
        assert_eq!(c.speed_range.r_min(), 20.0);
        assert_eq!(c.cost_rates.rate(Severity::Medium), 2.0);
        assert_eq!(c.seed, Some(9));
    }

    #[test]
    fn test_from_json_nested() {
        let c = EngineConfig::from_json(
            r#"{
                "speed_range": { "r_min": 25.0, "r_max": 60.0 },
                "cost_rates": { "low": 10.0, "medium": 20.0, "critical": 30.0 }
            }"#,
        )
        .expect("valid config");
        assert_eq!(c.speed_range.r_max(), 60.0);
        assert_eq!(c.cost_rates.rate(Severity::Low), 10.0);
        assert_eq!(c.time_limit_secs, 60.0);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            EngineConfig::from_json(r#"{ "time_limit_secs": 0.0 }"#),
            Err(RoutingError::Problem(ProblemError::InvalidTimeLimit(_)))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{ "speed_range": { "r_min": 80.0, "r_max": 20.0 } }"#),
            Err(RoutingError::Problem(ProblemError::InvalidSpeedRange { .. }))
        ));
        assert!(matches!(
            EngineConfig::from_json("not json"),
            Err(RoutingError::Json(_))
        ));
    }
}
