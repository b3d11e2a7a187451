//! Zone Classification
//!
//! Decides whether a sample lies in one of the agent's assigned zones, in a
//! foreign zone from the full catalog, or outside both.
//!
//! Assigned zones always win: once any assigned polygon contains the sample
//! the foreign search is skipped entirely, so overlapping territories never
//! raise a foreign-zone alert.

use serde::{Deserialize, Serialize};

use crate::catalog::{foreign, SalesZone};
use crate::config::SearchPolicy;
use crate::geo::{contains, distance_meters, Coordinate, Polygon};

/// Result of classifying one sample
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneClassification {
    pub in_assigned: bool,
    /// Never true while `in_assigned` is true
    pub in_foreign: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_zone_name: Option<String>,
}

impl ZoneClassification {
    fn assigned() -> Self {
        ZoneClassification {
            in_assigned: true,
            ..Default::default()
        }
    }

    fn foreign(zone: &SalesZone) -> Self {
        ZoneClassification {
            in_assigned: false,
            in_foreign: true,
            foreign_zone_name: Some(zone.name.clone()),
        }
    }

    fn outside() -> Self {
        ZoneClassification::default()
    }
}

/// Classifies samples against assigned and foreign zones
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoneClassifier {
    policy: SearchPolicy,
}

impl ZoneClassifier {
    pub fn new(policy: SearchPolicy) -> Self {
        ZoneClassifier { policy }
    }

    pub fn policy(&self) -> SearchPolicy {
        self.policy
    }

    /// Classify `sample`.
    ///
    /// `all_zones` of `None` means assignment-only mode: `in_foreign` is
    /// always false.
    pub fn classify(
        &self,
        sample: &Coordinate,
        assigned_zones: &[SalesZone],
        all_zones: Option<&[SalesZone]>,
    ) -> ZoneClassification {
        self.classify_with(sample, assigned_zones, all_zones, contains)
    }

    /// Same as [`classify`](Self::classify) with a caller-supplied containment test
    pub fn classify_with<F>(
        &self,
        sample: &Coordinate,
        assigned_zones: &[SalesZone],
        all_zones: Option<&[SalesZone]>,
        mut inside: F,
    ) -> ZoneClassification
    where
        F: FnMut(&Coordinate, &Polygon) -> bool,
    {
        if assigned_zones.iter().any(|z| inside(sample, &z.polygon)) {
            return ZoneClassification::assigned();
        }

        let candidates = foreign(assigned_zones, all_zones, |z| &z.id);
        let hit = match self.policy {
            SearchPolicy::FirstMatch => candidates.into_iter().find(|z| inside(sample, &z.polygon)),
            SearchPolicy::Nearest => candidates
                .into_iter()
                .filter(|z| inside(sample, &z.polygon))
                .map(|z| (centroid_distance(sample, z), z))
                .min_by(|a, b| a.0.total_cmp(&b.0))
                .map(|(_, z)| z),
        };

        match hit {
            Some(zone) => ZoneClassification::foreign(zone),
            None => ZoneClassification::outside(),
        }
    }
}

fn centroid_distance(sample: &Coordinate, zone: &SalesZone) -> f64 {
    zone.polygon
        .centroid()
        .map(|c| distance_meters(sample, &c))
        .unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(id: &str, name: &str, ring: &[[f64; 2]]) -> SalesZone {
        SalesZone {
            id: id.to_string(),
            name: name.to_string(),
            polygon: Polygon::from_exterior(ring.iter().map(|p| Coordinate::from(*p)).collect()),
        }
    }

    fn home() -> SalesZone {
        zone("1", "Home", &[[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0], [0.0, 0.0]])
    }

    fn north() -> SalesZone {
        zone("2", "North Zone", &[[15.0, 15.0], [15.0, 25.0], [25.0, 25.0], [25.0, 15.0]])
    }

    #[test]
    fn test_inside_assigned() {
        let assigned = vec![home()];
        let all = vec![home(), north()];
        let c = ZoneClassifier::default().classify(&Coordinate::new(5.0, 5.0), &assigned, Some(&all));
        assert!(c.in_assigned);
        assert!(!c.in_foreign);
        assert!(c.foreign_zone_name.is_none());
    }

    #[test]
    fn test_inside_foreign() {
        let assigned = vec![home()];
        let all = vec![home(), north()];
        let c = ZoneClassifier::default().classify(&Coordinate::new(20.0, 20.0), &assigned, Some(&all));
        assert!(!c.in_assigned);
        assert!(c.in_foreign);
        assert_eq!(c.foreign_zone_name.as_deref(), Some("North Zone"));
    }

    #[test]
    fn test_outside_everything() {
        let assigned = vec![home()];
        let all = vec![home(), north()];
        let c = ZoneClassifier::default().classify(&Coordinate::new(50.0, -3.0), &assigned, Some(&all));
        assert_eq!(c, ZoneClassification::default());
    }

    #[test]
    fn test_assignment_only_mode_never_foreign() {
        let assigned = vec![home()];
        let c = ZoneClassifier::default().classify(&Coordinate::new(20.0, 20.0), &assigned, None);
        assert!(!c.in_assigned);
        assert!(!c.in_foreign);
    }

    #[test]
    fn test_assigned_match_skips_foreign_search() {
        // Foreign zone overlapping the assigned one completely
        let assigned = vec![home()];
        let overlapping = zone("9", "Overlap", &[[-5.0, -5.0], [-5.0, 15.0], [15.0, 15.0], [15.0, -5.0]]);
        let all = vec![overlapping.clone(), home()];

        let mut tested = Vec::new();
        let c = ZoneClassifier::default().classify_with(
            &Coordinate::new(5.0, 5.0),
            &assigned,
            Some(&all),
            |p, polygon| {
                tested.push(polygon.clone());
                contains(p, polygon)
            },
        );

        assert!(c.in_assigned);
        assert!(!c.in_foreign);
        assert_eq!(tested, vec![home().polygon]);
    }

    #[test]
    fn test_first_match_follows_catalog_order() {
        let assigned = vec![home()];
        let big = zone("3", "Big", &[[0.0, 12.0], [0.0, 40.0], [40.0, 40.0], [40.0, 12.0]]);
        let all = vec![home(), big, north()];

        let first = ZoneClassifier::new(SearchPolicy::FirstMatch)
            .classify(&Coordinate::new(20.0, 20.0), &assigned, Some(&all));
        assert_eq!(first.foreign_zone_name.as_deref(), Some("Big"));

        // North Zone's centroid (20,20) is closer than Big's (20,26)
        let nearest = ZoneClassifier::new(SearchPolicy::Nearest)
            .classify(&Coordinate::new(20.0, 20.0), &assigned, Some(&all));
        assert_eq!(nearest.foreign_zone_name.as_deref(), Some("North Zone"));
    }

    #[test]
    fn test_assigned_zone_in_catalog_is_not_foreign() {
        // Sample outside the assigned polygon but the only catalog zone is the assigned one
        let assigned = vec![home()];
        let all = vec![home()];
        let c = ZoneClassifier::default().classify(&Coordinate::new(20.0, 20.0), &assigned, Some(&all));
        assert!(!c.in_foreign);
    }
}
