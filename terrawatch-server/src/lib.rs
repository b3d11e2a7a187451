//! Terrawatch Server
//!
//! Tokio host for the `terrawatch-core` engine. It owns everything with a
//! clock or a side effect:
//!
//! - **geolocation**: the provider contract, the sampler that wraps it, and a
//!   replay provider for recorded tracks
//! - **monitor**: the Idle -> Active -> Stopped monitoring loop publishing
//!   [`LocationStatus`](terrawatch_core::LocationStatus) on a watch channel
//! - **snapshot**: loading assignment snapshots from disk
//! - **config**: command line and monitor settings

pub mod config;
pub mod error;
pub mod geolocation;
pub mod monitor;
pub mod snapshot;

pub use config::{Cli, MonitorConfig};
pub use error::MonitorError;
pub use geolocation::{GeolocationProvider, GeolocationSampler, ReplayProvider, TrackEntry};
pub use monitor::{Monitor, MonitorHandle, MonitorState};
