//! Geolocation
//!
//! The engine never talks to a positioning device directly. A
//! [`GeolocationProvider`] answers one request at a time with a coordinate or
//! a [`GeolocationError`]; the [`GeolocationSampler`] wraps a provider with
//! the fixed request options and turns answers into timestamped samples.
//!
//! The sampler does not retry. A failure is handed to the monitor as-is.

use async_trait::async_trait;
use std::time::Duration;

use terrawatch_core::{Coordinate, GeolocationError, LocationSample, PositionOptions};

mod replay;

pub use replay::{ReplayProvider, TrackEntry};

/// External positioning capability
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Request one position fix
    async fn request(&self, options: &PositionOptions) -> Result<Coordinate, GeolocationError>;
}

/// Produces one [`LocationSample`] per call
pub struct GeolocationSampler<P> {
    provider: P,
    options: PositionOptions,
}

impl<P: GeolocationProvider> GeolocationSampler<P> {
    pub fn new(provider: P, options: PositionOptions) -> Self {
        Self { provider, options }
    }

    pub fn options(&self) -> &PositionOptions {
        &self.options
    }

    /// Issue exactly one request to the provider.
    ///
    /// The timeout from the options is enforced here as well, so a provider
    /// that never answers still yields [`GeolocationError::Timeout`].
    pub async fn request_sample(&self) -> Result<LocationSample, GeolocationError> {
        let timeout = Duration::from_millis(self.options.timeout_ms);

        match tokio::time::timeout(timeout, self.provider.request(&self.options)).await {
            Ok(Ok(position)) => {
                log::trace!("Position fix {}", position);
                Ok(LocationSample::new(position, now_millis()))
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(GeolocationError::Timeout(format!(
                "no position within {} ms",
                self.options.timeout_ms
            ))),
        }
    }
}

fn now_millis() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}
