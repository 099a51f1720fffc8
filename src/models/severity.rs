//! Severity classes and their operating cost rates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProblemError;

/// Emergency severity class.
///
/// Drives both the required-speed band and the hourly cost rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Basic unit.
    Low,
    /// Intermediate unit.
    Medium,
    /// Advanced life-support unit.
    Critical,
}

impl Severity {
    /// All classes, lowest first.
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::Critical];

    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown severity name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity `{0}`")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "leve" => Ok(Severity::Low),
            "medium" | "media" => Ok(Severity::Medium),
            "critical" | "crítica" | "critica" => Ok(Severity::Critical),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

/// Hourly operating cost per severity class.
///
/// # Examples
///
/// ```
/// use emergency_routing::models::{CostRates, Severity};
///
/// let rates = CostRates::default();
/// assert_eq!(rates.rate(Severity::Low), 100.0);
/// assert_eq!(rates.rate(Severity::Critical), 500.0);
///
/// let custom = CostRates::new(80.0, 200.0, 450.0);
/// assert_eq!(custom.rate(Severity::Medium), 200.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRates {
    /// Rate for [`Severity::Low`], currency per hour.
    pub low: f64,
    /// Rate for [`Severity::Medium`], currency per hour.
    pub medium: f64,
    /// Rate for [`Severity::Critical`], currency per hour.
    pub critical: f64,
}

impl CostRates {
    /// Creates a rate table.
    pub fn new(low: f64, medium: f64, critical: f64) -> Self {
        Self {
            low,
            medium,
            critical,
        }
    }

    /// Rate for the given class.
    pub fn rate(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::Critical => self.critical,
        }
    }

    /// Checks that every rate is finite and non-negative.
    pub fn validate(&self) -> Result<(), ProblemError> {
        for severity in Severity::ALL {
            let rate = self.rate(severity);
            if !rate.is_finite() || rate < 0.0 {
                return Err(ProblemError::InvalidCostRate { severity, rate });
            }
        }
        Ok(())
    }
}

impl Default for CostRates {
    fn default() -> Self {
        Self::new(100.0, 250.0, 500.0)
    }
}
