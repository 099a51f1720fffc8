//! Severity-keyed required-speed sampling.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ProblemError;
use crate::models::{CommoditySet, CostRates, EmergencyRequest, Severity};

/// Configured required-speed range `[r_min, r_max]` in km/h.
///
/// # Examples
///
/// ```
/// use emergency_routing::models::Severity;
/// use emergency_routing::speed::SpeedRange;
///
/// let range = SpeedRange::new(30.0, 70.0).unwrap();
/// let (lo, hi) = range.band(Severity::Critical);
/// assert!((lo - 56.0).abs() < 1e-9 && hi == 70.0);
/// let (lo, hi) = range.band(Severity::Low);
/// assert!(lo == 30.0 && (hi - 54.0).abs() < 1e-9);
/// assert!(SpeedRange::new(70.0, 30.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    r_min: f64,
    r_max: f64,
}

impl SpeedRange {
    /// Creates a range; requires `0 < r_min <= r_max`, both finite.
    pub fn new(r_min: f64, r_max: f64) -> Result<Self, ProblemError> {
        let range = Self { r_min, r_max };
        range.validate()?;
        Ok(range)
    }

    /// Re-checks the invariant (useful after deserialization).
    pub fn validate(&self) -> Result<(), ProblemError> {
        let ok = self.r_min.is_finite()
            && self.r_max.is_finite()
            && self.r_min > 0.0
            && self.r_min <= self.r_max;
        if ok {
            Ok(())
        } else {
            Err(ProblemError::InvalidSpeedRange {
                r_min: self.r_min,
                r_max: self.r_max,
            })
        }
    }

    /// Lower bound in km/h.
    pub fn r_min(&self) -> f64 {
        self.r_min
    }

    /// Upper bound in km/h.
    pub fn r_max(&self) -> f64 {
        self.r_max
    }

    /// Sampling band `(low, high)` for a severity class, `low <= high`.
    ///
    /// - Critical: `[0.8·r_max, r_max]`
    /// - Medium: `[r_min + 0.4·(r_max − r_min), 0.9·r_max]`
    /// - Low: `[r_min, r_min + 0.6·(r_max − r_min)]`
    ///
    /// Bands overlap. When `r_min` is close to `r_max` the Medium bounds
    /// cross; they are then returned in ascending order.
    pub fn band(&self, severity: Severity) -> (f64, f64) {
        let span = self.r_max - self.r_min;
        let (a, b) = match severity {
            Severity::Critical => (self.r_max * 0.8, self.r_max),
            Severity::Medium => (self.r_min + span * 0.4, self.r_max * 0.9),
            Severity::Low => (self.r_min, self.r_min + span * 0.6),
        };
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self {
            r_min: 30.0,
            r_max: 70.0,
        }
    }
}

/// Draws required speeds uniformly from each severity's band.
///
/// The generator owns no randomness: callers pass the RNG, typically a
/// seeded `ChaCha8Rng`, so model construction stays a pure function of its
/// inputs.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use emergency_routing::models::Severity;
/// use emergency_routing::speed::{RequiredSpeedGenerator, SpeedRange};
///
/// let gen = RequiredSpeedGenerator::new(SpeedRange::new(10.0, 40.0).unwrap());
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let speed = gen.draw(Severity::Critical, &mut rng);
/// assert!((32.0..=40.0).contains(&speed));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequiredSpeedGenerator {
    range: SpeedRange,
}

impl RequiredSpeedGenerator {
    /// Creates a generator over the given range.
    pub fn new(range: SpeedRange) -> Self {
        Self { range }
    }

    /// Configured range.
    pub fn range(&self) -> SpeedRange {
        self.range
    }

    /// Draws one required speed for a severity class.
    pub fn draw<R: Rng + ?Sized>(&self, severity: Severity, rng: &mut R) -> f64 {
        let (low, high) = self.range.band(severity);
        if low == high {
            return low;
        }
        rng.random_range(low..=high)
    }

    /// Builds a commodity set, drawing one speed per distinct commodity in
    /// first-request order.
    pub fn commodities<R: Rng + ?Sized>(
        &self,
        requests: &[EmergencyRequest],
        rates: &CostRates,
        rng: &mut R,
    ) -> Result<CommoditySet, ProblemError> {
        self.range.validate()?;
        CommoditySet::assemble(requests, rates, |key| {
            let speed = self.draw(key.severity, rng);
            debug!(commodity = %key, required_speed = speed, "required speed drawn");
            Ok(speed)
        })
    }
}
