//! Location Samples
//!
//! Types for the contract with the external geolocation capability: the
//! request options, a successful sample, and the failure taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{GEOLOCATION_TIMEOUT_MS, MAX_SAMPLE_AGE_MS};
use crate::geo::Coordinate;

/// One position fix, created once per monitoring tick and never mutated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSample {
    pub position: Coordinate,
    /// Acquisition time (milliseconds since epoch)
    pub timestamp: u64,
}

impl LocationSample {
    pub fn new(position: Coordinate, timestamp: u64) -> Self {
        LocationSample {
            position,
            timestamp,
        }
    }
}

/// Options passed with every geolocation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u64,
    /// Oldest cached fix the provider may hand back instead of a fresh one
    pub max_age_ms: u64,
}

impl Default for PositionOptions {
    fn default() -> Self {
        PositionOptions {
            high_accuracy: true,
            timeout_ms: GEOLOCATION_TIMEOUT_MS,
            max_age_ms: MAX_SAMPLE_AGE_MS,
        }
    }
}

/// Geolocation failure as reported by the provider.
///
/// None of these are fatal: the monitor records the message in the status
/// and tries again on the next tick.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "error", content = "message", rename_all = "snake_case")]
pub enum GeolocationError {
    #[error("Location permission denied: {0}")]
    PermissionDenied(String),

    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("Location request timed out: {0}")]
    Timeout(String),
}

impl GeolocationError {
    /// Numeric failure code (1 = permission denied, 2 = unavailable, 3 = timeout)
    pub fn code(&self) -> u16 {
        match self {
            GeolocationError::PermissionDenied(_) => 1,
            GeolocationError::PositionUnavailable(_) => 2,
            GeolocationError::Timeout(_) => 3,
        }
    }

    /// Map a provider `failure(code, message)`; unknown codes count as unavailable
    pub fn from_code(code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            1 => GeolocationError::PermissionDenied(message),
            3 => GeolocationError::Timeout(message),
            _ => GeolocationError::PositionUnavailable(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = PositionOptions::default();
        assert!(options.high_accuracy);
        assert_eq!(options.timeout_ms, 10_000);
        assert_eq!(options.max_age_ms, 5000);
    }

    #[test]
    fn test_error_codes() {
        for code in 1..=3 {
            assert_eq!(GeolocationError::from_code(code, "x").code(), code);
        }
        assert_eq!(
            GeolocationError::from_code(42, "odd"),
            GeolocationError::PositionUnavailable("odd".to_string())
        );
    }

    #[test]
    fn test_error_display() {
        let e = GeolocationError::Timeout("no fix after 10000 ms".to_string());
        assert_eq!(
            format!("{}", e),
            "Location request timed out: no fix after 10000 ms"
        );
    }

    #[test]
    fn test_error_json_shape() {
        let e: GeolocationError =
            serde_json::from_str(r#"{"error":"permission_denied","message":"user said no"}"#).unwrap();
        assert_eq!(e, GeolocationError::PermissionDenied("user said no".to_string()));
    }
}
