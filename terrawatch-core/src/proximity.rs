//! Foreign Point Proximity
//!
//! Looks for a sales point from the full catalog, not assigned to the agent,
//! within the alert radius of the sample.

use serde::{Deserialize, Serialize};

use crate::catalog::{foreign, SalesPoint};
use crate::config::{SearchPolicy, PROXIMITY_THRESHOLD_M};
use crate::geo::{distance_meters, Coordinate};

/// A foreign point within the alert radius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProximityMatch {
    pub point_id: String,
    pub name: String,
    pub distance_m: f64,
}

/// Foreign sales point detector
#[derive(Debug, Clone, Copy)]
pub struct ProximityDetector {
    threshold_m: f64,
    policy: SearchPolicy,
}

impl Default for ProximityDetector {
    fn default() -> Self {
        ProximityDetector::new(PROXIMITY_THRESHOLD_M, SearchPolicy::FirstMatch)
    }
}

impl ProximityDetector {
    pub fn new(threshold_m: f64, policy: SearchPolicy) -> Self {
        ProximityDetector {
            threshold_m,
            policy,
        }
    }

    pub fn threshold_m(&self) -> f64 {
        self.threshold_m
    }

    /// Find a foreign point within the threshold (inclusive).
    ///
    /// With [`SearchPolicy::FirstMatch`] the first qualifying point in
    /// catalog order is returned even if a later one is closer.
    /// Returns `None` when `all_points` is unavailable.
    pub fn find_nearby_foreign_point(
        &self,
        sample: &Coordinate,
        assigned_points: &[SalesPoint],
        all_points: Option<&[SalesPoint]>,
    ) -> Option<ProximityMatch> {
        let mut in_range = foreign(assigned_points, all_points, |p| &p.id)
            .into_iter()
            .map(|p| (p, distance_meters(sample, &p.position)))
            .filter(|(_, d)| *d <= self.threshold_m);

        let (point, distance_m) = match self.policy {
            SearchPolicy::FirstMatch => in_range.next()?,
            SearchPolicy::Nearest => in_range.min_by(|a, b| a.1.total_cmp(&b.1))?,
        };

        Some(ProximityMatch {
            point_id: point.id.clone(),
            name: point.name.clone(),
            distance_m,
        })
    }
}
