//! Location Status
//!
//! [`LocationStatus`] is the engine's only output: one immutable record per
//! completed tick, replaced wholesale by the next one. Fields start out
//! unknown (`None`), which is distinct from `Some(false)`.
//!
//! The presentation layer derives from it:
//! - a zone render color ([`ZoneColor`])
//! - the active alert set ([`Alerts`])
//! - at most one banner ([`Banner`]); a foreign zone masks a nearby foreign point

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::classifier::ZoneClassification;
use crate::location::GeolocationError;
use crate::proximity::ProximityMatch;

/// Per-tick monitoring result
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStatus {
    pub is_inside_assigned_zone: Option<bool>,

    /// Only ever `Some(true)` when `is_inside_assigned_zone` is `Some(false)`
    pub is_in_foreign_zone: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_zone_name: Option<String>,

    pub near_foreign_point: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_point_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_point_distance_meters: Option<f64>,

    /// Time of the last successful check (milliseconds since epoch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_checked_at: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LocationStatus {
    /// Initial status: nothing determined yet
    pub fn unknown() -> Self {
        LocationStatus::default()
    }

    /// Combine one tick's results into a fresh status.
    ///
    /// Foreign-zone membership masks proximity: when `in_foreign` is set the
    /// proximity match is dropped so only one alert class is surfaced.
    pub fn aggregate(
        classification: &ZoneClassification,
        proximity: Option<&ProximityMatch>,
        checked_at: u64,
    ) -> Self {
        let in_assigned = classification.in_assigned;
        let in_foreign = !in_assigned && classification.in_foreign;
        let proximity = if in_foreign { None } else { proximity };

        LocationStatus {
            is_inside_assigned_zone: Some(in_assigned),
            is_in_foreign_zone: Some(in_foreign),
            foreign_zone_name: if in_foreign {
                classification.foreign_zone_name.clone()
            } else {
                None
            },
            near_foreign_point: Some(proximity.is_some()),
            foreign_point_name: proximity.map(|m| m.name.clone()),
            foreign_point_distance_meters: proximity.map(|m| m.distance_m),
            last_checked_at: Some(checked_at),
            error: None,
        }
    }

    /// Record a failed tick: keep every prior field, including
    /// `last_checked_at`, and overwrite only `error`
    pub fn with_error(&self, error: &GeolocationError) -> Self {
        LocationStatus {
            error: Some(error.to_string()),
            ..self.clone()
        }
    }

    /// True once at least one tick has classified a sample
    pub fn is_determined(&self) -> bool {
        self.is_inside_assigned_zone.is_some()
    }

    /// Equal apart from `last_checked_at`
    pub fn same_reading(&self, other: &LocationStatus) -> bool {
        LocationStatus {
            last_checked_at: None,
            ..self.clone()
        } == LocationStatus {
            last_checked_at: None,
            ..other.clone()
        }
    }

    pub fn zone_color(&self) -> ZoneColor {
        match self.is_inside_assigned_zone {
            None => ZoneColor::Neutral,
            Some(true) => ZoneColor::Affirmative,
            Some(false) => ZoneColor::Warning,
        }
    }

    pub fn alerts(&self) -> Alerts {
        let mut alerts = Alerts::empty();
        if self.is_in_foreign_zone == Some(true) {
            alerts |= Alerts::FOREIGN_ZONE;
        }
        if self.near_foreign_point == Some(true) {
            alerts |= Alerts::NEAR_FOREIGN_POINT;
        }
        if self.error.is_some() {
            alerts |= Alerts::GEOLOCATION_ERROR;
        }
        alerts
    }

    /// The banner to display, if any. Foreign zone takes priority.
    pub fn banner(&self) -> Option<Banner> {
        if self.is_in_foreign_zone == Some(true) {
            return Some(Banner::ForeignZone {
                zone_name: self.foreign_zone_name.clone().unwrap_or_default(),
            });
        }
        if self.near_foreign_point == Some(true) {
            return Some(Banner::NearForeignPoint {
                point_name: self.foreign_point_name.clone().unwrap_or_default(),
                distance_m: self.foreign_point_distance_meters.unwrap_or_default(),
            });
        }
        None
    }
}

/// Render color class for the assigned zones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneColor {
    /// Not yet determined
    Neutral,
    /// Inside an assigned zone
    Affirmative,
    /// In a foreign zone or outside all zones
    Warning,
}

bitflags! {
    /// Alert conditions present in a status
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Alerts: u8 {
        const FOREIGN_ZONE = 0b0000_0001;
        const NEAR_FOREIGN_POINT = 0b0000_0010;
        const GEOLOCATION_ERROR = 0b0000_0100;
    }
}

/// Alert banner shown to the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Banner {
    ForeignZone { zone_name: String },
    NearForeignPoint { point_name: String, distance_m: f64 },
}

impl std::fmt::Display for Banner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Banner::ForeignZone { zone_name } => {
                write!(f, "You are inside zone '{}', which is not assigned to you", zone_name)
            }
            Banner::NearForeignPoint {
                point_name,
                distance_m,
            } => write!(
                f,
                "Sales point '{}' is {} m away and is not assigned to you",
                point_name,
                distance_m.round() as i64
            ),
        }
    }
}
