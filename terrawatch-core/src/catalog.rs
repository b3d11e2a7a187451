//! Sales Catalog
//!
//! Sales zones and points as delivered by the profile backend, and the
//! [`AssignmentSnapshot`] the engine evaluates against for one monitoring
//! session.
//!
//! The backend hands out numeric ids; they are kept as opaque strings here.
//! A snapshot without `allZones` / `allPoints` runs in assignment-only mode,
//! where nothing can be foreign.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::geo::{Coordinate, Polygon};

/// Snapshot loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid snapshot document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Accept `12` as well as `"12"`
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

/// A polygon-bounded sales territory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesZone {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "coordinates")]
    pub polygon: Polygon,
}

/// Kind of business at a sales point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointCategory {
    #[serde(rename = "distribuidor")]
    Distributor,
    #[serde(rename = "ferreteria")]
    HardwareStore,
    #[serde(rename = "deposito")]
    Warehouse,
}

impl PointCategory {
    /// Display label as shown in the sales point list
    pub fn label(&self) -> &'static str {
        match self {
            PointCategory::Distributor => "Distribuidor",
            PointCategory::HardwareStore => "Ferretería",
            PointCategory::Warehouse => "Depósito",
        }
    }
}

impl std::fmt::Display for PointCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A customer location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesPoint {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(rename = "coordinates")]
    pub position: Coordinate,
    #[serde(rename = "type")]
    pub category: PointCategory,
}

impl SalesPoint {
    /// External map search link for this point
    pub fn maps_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            self.position.lat, self.position.lon
        )
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.address.to_lowercase().contains(needle)
    }
}

/// Read-only catalog data for one monitoring session.
///
/// `assigned_*` is the agent's own territory. `all_*`, when present, is the
/// full catalog; anything in it whose id is not assigned is foreign.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSnapshot {
    #[serde(default)]
    pub assigned_zones: Vec<SalesZone>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_zones: Option<Vec<SalesZone>>,

    #[serde(default)]
    pub assigned_points: Vec<SalesPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_points: Option<Vec<SalesPoint>>,
}

impl AssignmentSnapshot {
    /// Parse a snapshot document
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// True when the agent has any zone or point assigned.
    ///
    /// The monitor stays idle until this holds.
    pub fn has_assignments(&self) -> bool {
        !self.assigned_zones.is_empty() || !self.assigned_points.is_empty()
    }

    /// True when neither full catalog is available
    pub fn is_assignment_only(&self) -> bool {
        self.all_zones.is_none() && self.all_points.is_none()
    }

    /// Zones from the full catalog that are not assigned, in catalog order.
    ///
    /// Empty in assignment-only mode.
    pub fn foreign_zones(&self) -> Vec<&SalesZone> {
        foreign(&self.assigned_zones, self.all_zones.as_deref(), |z| &z.id)
    }

    /// Points from the full catalog that are not assigned, in catalog order
    pub fn foreign_points(&self) -> Vec<&SalesPoint> {
        foreign(&self.assigned_points, self.all_points.as_deref(), |p| &p.id)
    }

    /// Case-insensitive search on name or address over the assigned points
    pub fn search_points(&self, term: &str) -> Vec<&SalesPoint> {
        let needle = term.trim().to_lowercase();
        self.assigned_points
            .iter()
            .filter(|p| needle.is_empty() || p.matches(&needle))
            .collect()
    }
}

/// `all` minus `assigned`, by id, keeping the order of `all`
pub(crate) fn foreign<'a, T, F>(assigned: &[T], all: Option<&'a [T]>, id: F) -> Vec<&'a T>
where
    F: Fn(&T) -> &String,
{
    let Some(all) = all else {
        return Vec::new();
    };
    let assigned_ids: HashSet<&str> = assigned.iter().map(|t| id(t).as_str()).collect();
    all.iter()
        .filter(|t| !assigned_ids.contains(id(t).as_str()))
        .collect()
}
