//! Routing requests and the commodities derived from them.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{CostRates, Severity};
use crate::error::ProblemError;
use crate::network::NodeId;

/// A raw emergency request: a destination and a severity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmergencyRequest {
    /// Node the response unit must reach.
    pub destination: NodeId,
    /// Severity class.
    pub severity: Severity,
}

impl EmergencyRequest {
    /// Creates a request.
    pub fn new(destination: impl Into<NodeId>, severity: Severity) -> Self {
        Self {
            destination: destination.into(),
            severity,
        }
    }

    /// Commodity identity this request maps to.
    pub fn key(&self) -> CommodityKey {
        CommodityKey::new(self.destination, self.severity)
    }
}

/// Commodity identity: the `(destination, severity)` pair.
///
/// Requests sharing both components collapse into one commodity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommodityKey {
    /// Destination node.
    pub destination: NodeId,
    /// Severity class.
    pub severity: Severity,
}

impl CommodityKey {
    /// Creates a key.
    pub fn new(destination: NodeId, severity: Severity) -> Self {
        Self {
            destination,
            severity,
        }
    }

    /// Stable string form used as export key, e.g. `"42_Critical"`.
    pub fn label(&self) -> String {
        format!("{}_{}", self.destination, self.severity)
    }
}

impl fmt::Display for CommodityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.destination, self.severity)
    }
}

/// A routing commodity: one path from the origin to `key.destination`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commodity {
    key: CommodityKey,
    required_speed: f64,
    cost_rate: f64,
    request_count: usize,
}

impl Commodity {
    /// Commodity identity.
    pub fn key(&self) -> CommodityKey {
        self.key
    }

    /// Destination node.
    pub fn destination(&self) -> NodeId {
        self.key.destination
    }

    /// Severity class.
    pub fn severity(&self) -> Severity {
        self.key.severity
    }

    /// Minimum capacity (km/h) of every arc on this commodity's path.
    pub fn required_speed(&self) -> f64 {
        self.required_speed
    }

    /// Operating cost per hour of travel.
    pub fn cost_rate(&self) -> f64 {
        self.cost_rate
    }

    /// Number of raw requests merged into this commodity (at least 1).
    pub fn request_count(&self) -> usize {
        self.request_count
    }
}

/// The ordered, de-duplicated set of commodities of one problem instance.
///
/// Commodities appear in first-request order; duplicates of an existing
/// `(destination, severity)` key are merged and counted.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use emergency_routing::models::{CommoditySet, CostRates, EmergencyRequest, Severity};
///
/// let requests = [
///     EmergencyRequest::new(5, Severity::Critical),
///     EmergencyRequest::new(5, Severity::Critical),
///     EmergencyRequest::new(5, Severity::Low),
/// ];
/// let speeds: HashMap<_, _> = requests.iter().map(|r| (r.key(), 30.0)).collect();
/// let set = CommoditySet::with_required_speeds(&requests, &CostRates::default(), &speeds).unwrap();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.get(0).request_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommoditySet {
    commodities: Vec<Commodity>,
}

impl CommoditySet {
    /// Distinct commodity keys with their request counts, in first-request order.
    pub fn group_requests(requests: &[EmergencyRequest]) -> Vec<(CommodityKey, usize)> {
        let mut position: HashMap<CommodityKey, usize> = HashMap::new();
        let mut grouped: Vec<(CommodityKey, usize)> = Vec::new();
        for request in requests {
            let key = request.key();
            match position.get(&key) {
                Some(&idx) => grouped[idx].1 += 1,
                None => {
                    position.insert(key, grouped.len());
                    grouped.push((key, 1));
                }
            }
        }
        grouped
    }

    /// Builds the set using explicitly supplied required speeds.
    pub fn with_required_speeds(
        requests: &[EmergencyRequest],
        rates: &CostRates,
        speeds: &HashMap<CommodityKey, f64>,
    ) -> Result<Self, ProblemError> {
        Self::assemble(requests, rates, |key| {
            speeds
                .get(key)
                .copied()
                .ok_or(ProblemError::MissingRequiredSpeed(*key))
        })
    }

    /// Builds the set, asking `speed_for` for each distinct commodity in order.
    pub(crate) fn assemble<F>(
        requests: &[EmergencyRequest],
        rates: &CostRates,
        mut speed_for: F,
    ) -> Result<Self, ProblemError>
    where
        F: FnMut(&CommodityKey) -> Result<f64, ProblemError>,
    {
        if requests.is_empty() {
            return Err(ProblemError::NoRequests);
        }
        rates.validate()?;

        let grouped = Self::group_requests(requests);
        let mut commodities = Vec::with_capacity(grouped.len());
        for (key, request_count) in grouped {
            let required_speed = speed_for(&key)?;
            if !required_speed.is_finite() || required_speed <= 0.0 {
                return Err(ProblemError::InvalidRequiredSpeed {
                    commodity: key,
                    speed: required_speed,
                });
            }
            if request_count > 1 {
                warn!(
                    commodity = %key,
                    requests = request_count,
                    "duplicate requests merged into one commodity"
                );
            }
            commodities.push(Commodity {
                key,
                required_speed,
                cost_rate: rates.rate(key.severity),
                request_count,
            });
        }
        Ok(Self { commodities })
    }

    /// Number of commodities.
    pub fn len(&self) -> usize {
        self.commodities.len()
    }

    /// Returns `true` if the set has no commodities.
    pub fn is_empty(&self) -> bool {
        self.commodities.is_empty()
    }

    /// Commodity at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn get(&self, idx: usize) -> &Commodity {
        &self.commodities[idx]
    }

    /// Index of the commodity with the given key.
    pub fn position(&self, key: CommodityKey) -> Option<usize> {
        self.commodities.iter().position(|c| c.key == key)
    }

    /// Iterates over commodities in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, Commodity> {
        self.commodities.iter()
    }
}

impl<'a> IntoIterator for &'a CommoditySet {
    type Item = &'a Commodity;
    type IntoIter = std::slice::Iter<'a, Commodity>;

    fn into_iter(self) -> Self::IntoIter {
        self.commodities.iter()
    }
}
