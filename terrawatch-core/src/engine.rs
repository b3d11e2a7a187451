//! Tick Evaluation
//!
//! One pass of classify -> proximity -> aggregate for a sample against an
//! assignment snapshot. Pure and deterministic: the same sample and snapshot
//! always produce the same status.

use crate::catalog::AssignmentSnapshot;
use crate::classifier::ZoneClassifier;
use crate::config::EngineConfig;
use crate::location::LocationSample;
use crate::proximity::ProximityDetector;
use crate::status::LocationStatus;

/// The geofence engine
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    config: EngineConfig,
    classifier: ZoneClassifier,
    detector: ProximityDetector,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Engine {
            config,
            classifier: ZoneClassifier::new(config.zone_policy),
            detector: ProximityDetector::new(config.proximity_threshold_m, config.point_policy),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate one sample. The status is stamped with the sample's timestamp.
    pub fn evaluate(&self, sample: &LocationSample, snapshot: &AssignmentSnapshot) -> LocationStatus {
        let position = &sample.position;

        let classification = self.classifier.classify(
            position,
            &snapshot.assigned_zones,
            snapshot.all_zones.as_deref(),
        );

        // Not needed when already inside a foreign zone
        let proximity = if classification.in_foreign {
            None
        } else {
            self.detector.find_nearby_foreign_point(
                position,
                &snapshot.assigned_points,
                snapshot.all_points.as_deref(),
            )
        };

        LocationStatus::aggregate(&classification, proximity.as_ref(), sample.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchPolicy;
    use crate::geo::Coordinate;
    use crate::status::{Banner, ZoneColor};

    fn snapshot() -> AssignmentSnapshot {
        AssignmentSnapshot::from_json(
            r#"{
            "assignedZones": [
                {"id": 1, "name": "Home", "coordinates": [[[0,0],[0,10],[10,10],[10,0],[0,0]]]}
            ],
            "allZones": [
                {"id": 1, "name": "Home", "coordinates": [[[0,0],[0,10],[10,10],[10,0],[0,0]]]},
                {"id": 2, "name": "North Zone", "coordinates": [[[15,15],[15,25],[25,25],[25,15]]]}
            ],
            "assignedPoints": [
                {"id": 10, "name": "Mine", "address": "A", "coordinates": [5.0, 5.0], "type": "ferreteria"}
            ],
            "allPoints": [
                {"id": 10, "name": "Mine", "address": "A", "coordinates": [5.0, 5.0], "type": "ferreteria"},
                {"id": 11, "name": "Rival", "address": "B", "coordinates": [30.0, 30.0], "type": "distribuidor"},
                {"id": 12, "name": "Inside North", "address": "C", "coordinates": [20.0, 20.0], "type": "deposito"}
            ]
        }"#,
        )
        .unwrap()
    }

    fn at(lon: f64, lat: f64) -> LocationSample {
        LocationSample::new(Coordinate::new(lon, lat), 1_700_000_000_000)
    }

    #[test]
    fn test_inside_assigned_zone() {
        let status = Engine::default().evaluate(&at(5.0, 5.0), &snapshot());
        assert_eq!(status.is_inside_assigned_zone, Some(true));
        assert_eq!(status.is_in_foreign_zone, Some(false));
        assert_eq!(status.last_checked_at, Some(1_700_000_000_000));
        assert_eq!(status.zone_color(), ZoneColor::Affirmative);
    }

    #[test]
    fn test_foreign_zone_scenario() {
        // A foreign point sits right at the sample but the zone alert wins
        let status = Engine::default().evaluate(&at(20.0, 20.0), &snapshot());
        assert_eq!(status.is_inside_assigned_zone, Some(false));
        assert_eq!(status.is_in_foreign_zone, Some(true));
        assert_eq!(status.foreign_zone_name.as_deref(), Some("North Zone"));
        assert_eq!(status.near_foreign_point, Some(false));
        assert_eq!(
            status.banner(),
            Some(Banner::ForeignZone {
                zone_name: "North Zone".to_string()
            })
        );
    }

    #[test]
    fn test_near_foreign_point_outside_zones() {
        let status = Engine::default().evaluate(&at(30.0, 30.0003), &snapshot());
        assert_eq!(status.is_inside_assigned_zone, Some(false));
        assert_eq!(status.is_in_foreign_zone, Some(false));
        assert_eq!(status.near_foreign_point, Some(true));
        assert_eq!(status.foreign_point_name.as_deref(), Some("Rival"));
        let d = status.foreign_point_distance_meters.unwrap();
        assert!(d > 30.0 && d < 40.0, "got {}", d);
    }

    #[test]
    fn test_proximity_runs_inside_assigned_zone() {
        let mut snapshot = snapshot();
        if let Some(all) = snapshot.all_points.as_mut() {
            all[1].position = Coordinate::new(5.0, 5.0003);
        }
        let status = Engine::default().evaluate(&at(5.0, 5.0), &snapshot);
        assert_eq!(status.is_inside_assigned_zone, Some(true));
        assert_eq!(status.near_foreign_point, Some(true));
        assert_eq!(status.foreign_point_name.as_deref(), Some("Rival"));
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let engine = Engine::default();
        let snapshot = snapshot();
        for sample in [at(5.0, 5.0), at(20.0, 20.0), at(30.0, 30.0003), at(-40.0, 2.0)] {
            let first = engine.evaluate(&sample, &snapshot);
            let second = engine.evaluate(&sample, &snapshot);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_assignment_only_snapshot() {
        let mut snapshot = snapshot();
        snapshot.all_zones = None;
        snapshot.all_points = None;
        let status = Engine::default().evaluate(&at(20.0, 20.0), &snapshot);
        assert_eq!(status.is_inside_assigned_zone, Some(false));
        assert_eq!(status.is_in_foreign_zone, Some(false));
        assert_eq!(status.near_foreign_point, Some(false));
        assert_eq!(status.zone_color(), ZoneColor::Warning);
    }

    #[test]
    fn test_config_is_applied() {
        let config = EngineConfig {
            proximity_threshold_m: 10.0,
            ..EngineConfig::default()
        }
        .with_policy(SearchPolicy::Nearest);
        let engine = Engine::new(config);
        assert_eq!(engine.config().point_policy, SearchPolicy::Nearest);
        assert_eq!(engine.classifier.policy(), SearchPolicy::Nearest);
        assert_eq!(engine.detector.threshold_m(), 10.0);

        // Rival is ~33 m away, outside a 10 m radius
        let status = engine.evaluate(&at(30.0, 30.0003), &snapshot());
        assert_eq!(status.near_foreign_point, Some(false));
    }
}
