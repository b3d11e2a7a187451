//! Monitoring Loop
//!
//! Drives the engine on a fixed period and publishes one
//! [`LocationStatus`] per completed tick.
//!
//! # States
//!
//! - **Idle**: no assignments yet, nothing is sampled
//! - **Active**: one immediate tick, then one tick every poll interval
//! - **Stopped**: torn down through [`MonitorHandle::stop`] or by dropping
//!   the handle
//!
//! Ticks are serialized: the next tick does not start until the previous
//! sample request has completed, and timer ticks that elapse meanwhile are
//! skipped. If the assignments become empty while active the loop keeps
//! running but ticks do nothing until assignments return.
//!
//! Once `stop` has been called no status is published any more; a sample
//! still in flight at that moment is dropped.
//!
//! ```rust,ignore
//! let (monitor, handle) = Monitor::new(provider, &MonitorConfig::default());
//! let mut status = handle.subscribe();
//! tokio::spawn(monitor.run());
//!
//! handle.update_snapshot(snapshot);
//! while status.changed().await.is_ok() {
//!     println!("{:?}", status.borrow().zone_color());
//! }
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use terrawatch_core::{AssignmentSnapshot, Engine, LocationStatus};

use crate::config::MonitorConfig;
use crate::geolocation::{GeolocationProvider, GeolocationSampler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Active,
    Stopped,
}

impl fmt::Display for MonitorState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            MonitorState::Idle => "idle",
            MonitorState::Active => "active",
            MonitorState::Stopped => "stopped",
        };
        write!(f, "{}", s)
    }
}

/// Control and observation side of a [`Monitor`]
#[derive(Debug)]
pub struct MonitorHandle {
    token: CancellationToken,
    snapshot_tx: watch::Sender<Arc<AssignmentSnapshot>>,
    status_rx: watch::Receiver<LocationStatus>,
    state_rx: watch::Receiver<MonitorState>,
}

impl MonitorHandle {
    /// Replace the assignment snapshot; used from the next tick on
    pub fn update_snapshot(&self, snapshot: AssignmentSnapshot) {
        self.snapshot_tx.send_replace(Arc::new(snapshot));
    }

    /// The current status
    pub fn status(&self) -> LocationStatus {
        self.status_rx.borrow().clone()
    }

    /// Receiver notified on every published status
    pub fn subscribe(&self) -> watch::Receiver<LocationStatus> {
        self.status_rx.clone()
    }

    pub fn state(&self) -> MonitorState {
        *self.state_rx.borrow()
    }

    pub fn state_changes(&self) -> watch::Receiver<MonitorState> {
        self.state_rx.clone()
    }

    /// Tear the monitor down. Nothing is published after this returns.
    pub fn stop(&self) {
        self.token.cancel();
        // Publishing checks the token under the channel's write lock, so
        // taking the read lock waits out a publish that won the race.
        drop(self.status_rx.borrow());
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

pub struct Monitor<P> {
    sampler: GeolocationSampler<P>,
    engine: Engine,
    poll_interval: Duration,
    token: CancellationToken,
    snapshot_rx: watch::Receiver<Arc<AssignmentSnapshot>>,
    status_tx: watch::Sender<LocationStatus>,
    state_tx: watch::Sender<MonitorState>,
}

impl<P: GeolocationProvider> Monitor<P> {
    pub fn new(provider: P, config: &MonitorConfig) -> (Self, MonitorHandle) {
        let token = CancellationToken::new();
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(AssignmentSnapshot::default()));
        let (status_tx, status_rx) = watch::channel(LocationStatus::unknown());
        let (state_tx, state_rx) = watch::channel(MonitorState::Idle);

        let monitor = Monitor {
            sampler: GeolocationSampler::new(provider, config.position_options),
            engine: Engine::new(config.engine),
            poll_interval: config.poll_interval,
            token: token.clone(),
            snapshot_rx,
            status_tx,
            state_tx,
        };
        let handle = MonitorHandle {
            token,
            snapshot_tx,
            status_rx,
            state_rx,
        };
        (monitor, handle)
    }

    /// Run until stopped
    pub async fn run(mut self) {
        if !self.wait_for_assignments().await {
            self.set_state(MonitorState::Stopped);
            return;
        }
        self.set_state(MonitorState::Active);

        // First tick of a tokio interval completes immediately
        let mut timer = interval(self.poll_interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = self.token.cancelled() => break,
                _ = timer.tick() => {}
            }
            self.tick().await;
        }

        self.set_state(MonitorState::Stopped);
    }

    async fn wait_for_assignments(&mut self) -> bool {
        loop {
            if self.snapshot_rx.borrow_and_update().has_assignments() {
                return true;
            }
            tokio::select! {
                biased;
                _ = self.token.cancelled() => return false,
                changed = self.snapshot_rx.changed() => {
                    if changed.is_err() {
                        log::debug!("Snapshot source closed while idle");
                        return false;
                    }
                }
            }
        }
    }

    async fn tick(&mut self) {
        let snapshot = Arc::clone(&self.snapshot_rx.borrow_and_update());
        if !snapshot.has_assignments() {
            log::debug!("No assignments, skipping check");
            return;
        }

        let result = tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            r = self.sampler.request_sample() => Some(r),
        };
        let result = match result {
            Some(r) if !self.token.is_cancelled() => r,
            _ => {
                log::debug!("Monitor stopped, discarding in-flight sample");
                return;
            }
        };

        let next = match result {
            Ok(sample) => {
                let status = self.engine.evaluate(&sample, &snapshot);
                log::debug!(
                    "{}: assigned={:?} foreign={:?} near_point={:?}",
                    sample.position,
                    status.is_inside_assigned_zone,
                    status.is_in_foreign_zone,
                    status.near_foreign_point
                );
                status
            }
            Err(e) => {
                log::warn!("Geolocation failed: {}", e);
                let prior = self.status_tx.borrow().clone();
                prior.with_error(&e)
            }
        };
        let token = &self.token;
        let published = self.status_tx.send_if_modified(|current| {
            if token.is_cancelled() {
                return false;
            }
            *current = next;
            true
        });
        if !published {
            log::debug!("Monitor stopped, discarding status");
        }
    }

    fn set_state(&self, state: MonitorState) {
        log::info!("Monitor {}", state);
        self.state_tx.send_replace(state);
    }
}
