//! Engine Configuration
//!
//! Fixed thresholds of the monitoring engine and the tunable search strategy.

use serde::{Deserialize, Serialize};

/// A foreign sales point closer than this raises a proximity alert (meters)
pub const PROXIMITY_THRESHOLD_M: f64 = 100.0;

/// Period of the monitoring timer (milliseconds)
pub const POLL_INTERVAL_MS: u64 = 5000;

/// Geolocation request timeout (milliseconds)
pub const GEOLOCATION_TIMEOUT_MS: u64 = 10_000;

/// Maximum age of a cached position the geolocation provider may return (milliseconds)
pub const MAX_SAMPLE_AGE_MS: u64 = 5000;

/// Mean Earth radius used by the haversine formula (meters)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// How a search over the catalog picks its result when several candidates qualify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPolicy {
    /// First qualifying entry in catalog order
    #[default]
    FirstMatch,
    /// Qualifying entry closest to the sample
    Nearest,
}

/// Engine settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Proximity alert radius in meters
    pub proximity_threshold_m: f64,
    /// Which foreign zone is reported when the sample lies in several
    pub zone_policy: SearchPolicy,
    /// Which foreign point is reported when several are within range
    pub point_policy: SearchPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            proximity_threshold_m: PROXIMITY_THRESHOLD_M,
            zone_policy: SearchPolicy::FirstMatch,
            point_policy: SearchPolicy::FirstMatch,
        }
    }
}

impl EngineConfig {
    /// Use the same search policy for zones and points
    pub fn with_policy(mut self, policy: SearchPolicy) -> Self {
        self.zone_policy = policy;
        self.point_policy = policy;
        self
    }
}
