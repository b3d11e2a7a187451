//! Terrawatch Core
//!
//! Platform-independent geofence engine for field sales territories.
//! Everything in this crate is pure: no I/O, no async runtime, no logging
//! backend. The host (see `terrawatch-server`) owns sampling and scheduling
//! and feeds samples through [`Engine::evaluate`].
//!
//! # Modules
//!
//! - **geo**: coordinates, polygons, ray-casting containment, haversine distance
//! - **catalog**: sales zones, sales points and the per-session assignment snapshot
//! - **classifier**: assigned / foreign / outside classification of a sample
//! - **proximity**: foreign sales point proximity detection
//! - **status**: the published [`LocationStatus`] record and its presentation helpers
//! - **engine**: one tick of sample -> classify -> aggregate
//!
//! # Example
//!
//! ```rust,ignore
//! use terrawatch_core::{AssignmentSnapshot, Engine, EngineConfig, LocationSample, Coordinate};
//!
//! let snapshot = AssignmentSnapshot::from_json(&json)?;
//! let engine = Engine::new(EngineConfig::default());
//!
//! let sample = LocationSample::new(Coordinate::new(-80.84, 35.22), timestamp_ms);
//! let status = engine.evaluate(&sample, &snapshot);
//! if let Some(banner) = status.banner() {
//!     println!("{}", banner);
//! }
//! ```

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod geo;
pub mod location;
pub mod proximity;
pub mod status;

pub use catalog::{AssignmentSnapshot, CatalogError, PointCategory, SalesPoint, SalesZone};
pub use classifier::{ZoneClassification, ZoneClassifier};
pub use config::{EngineConfig, SearchPolicy};
pub use engine::Engine;
pub use geo::{contains, distance_meters, Coordinate, Polygon};
pub use location::{GeolocationError, LocationSample, PositionOptions};
pub use proximity::{ProximityDetector, ProximityMatch};
pub use status::{Alerts, Banner, LocationStatus, ZoneColor};
