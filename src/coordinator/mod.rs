// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic desk polling.
//!
//! [`DeskCoordinator`] owns the desk handle and turns it into a stream of
//! [`Snapshot`]s. Each refresh reads the backlight, system and legs
//! sub-APIs one after another under a single deadline; either all three
//! reads succeed and a snapshot is published, or the refresh fails as a
//! whole with one [`UpdateFailed`].
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use myrtdesk_lib::coordinator::{CoordinatorConfig, DeskCoordinator};
//! use myrtdesk_lib::protocol::HttpConfig;
//!
//! # async fn example() -> myrtdesk_lib::Result<()> {
//! let desk = Arc::new(HttpConfig::new("192.168.1.60").into_desk()?);
//! let coordinator = Arc::new(DeskCoordinator::new(desk, CoordinatorConfig::new()));
//!
//! let mut events = coordinator.subscribe();
//! let poller = coordinator.spawn();
//!
//! while let Ok(event) = events.recv().await {
//!     if let Some(snapshot) = event.snapshot() {
//!         println!("desk at {} mm", snapshot.height());
//!     }
//! }
//! poller.abort();
//! # Ok(())
//! # }
//! ```

mod config;
mod snapshot;

pub use config::CoordinatorConfig;
pub use snapshot::Snapshot;

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::{Error, UpdateFailed};
use crate::event::{DeskEvent, EventBus};
use crate::protocol::{Backlight, Desk, Legs, System};

/// Polls a desk and publishes its state.
///
/// Refreshes never overlap: a manual [`refresh`](Self::refresh) issued while
/// the scheduled one is running waits for it to finish and then performs
/// its own cycle.
pub struct DeskCoordinator<D: Desk> {
    desk: Arc<D>,
    config: CoordinatorConfig,
    data: RwLock<Option<Arc<Snapshot>>>,
    last_error: RwLock<Option<Arc<UpdateFailed>>>,
    last_update_success: AtomicBool,
    refresh_lock: Mutex<()>,
    bus: EventBus,
}

impl<D: Desk> DeskCoordinator<D> {
    /// Creates a coordinator. Nothing is read until the first refresh.
    #[must_use]
    pub fn new(desk: Arc<D>, config: CoordinatorConfig) -> Self {
        let bus = EventBus::with_capacity(config.event_capacity());
        Self {
            desk,
            config,
            data: RwLock::new(None),
            last_error: RwLock::new(None),
            last_update_success: AtomicBool::new(false),
            refresh_lock: Mutex::new(()),
            bus,
        }
    }

    /// Returns the desk handle.
    #[must_use]
    pub fn desk(&self) -> &Arc<D> {
        &self.desk
    }

    /// Returns the polling configuration.
    #[must_use]
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Returns the last known good snapshot.
    #[must_use]
    pub fn data(&self) -> Option<Arc<Snapshot>> {
        self.data.read().clone()
    }

    /// Returns the failure of the most recent refresh, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<Arc<UpdateFailed>> {
        self.last_error.read().clone()
    }

    /// Returns `true` if the most recent refresh succeeded.
    ///
    /// `false` before the first refresh.
    #[must_use]
    pub fn last_update_success(&self) -> bool {
        self.last_update_success.load(Ordering::Acquire)
    }

    /// Subscribes to refresh outcomes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeskEvent> {
        self.bus.subscribe()
    }

    /// Runs one poll cycle.
    ///
    /// On success the new snapshot becomes the last known good value and is
    /// published. On failure nothing is cached, the previous snapshot stays
    /// current, and a single `UpdateFailed` is published and returned.
    ///
    /// # Errors
    ///
    /// Returns `UpdateFailed` wrapping the transport, parse, value or
    /// deadline error that aborted the cycle.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, Arc<UpdateFailed>> {
        let _guard = self.refresh_lock.lock().await;

        let deadline = self.config.refresh_timeout();
        let outcome = match tokio::time::timeout(deadline, self.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(deadline)),
        };

        match outcome {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                *self.data.write() = Some(Arc::clone(&snapshot));
                *self.last_error.write() = None;
                self.last_update_success.store(true, Ordering::Release);

                tracing::debug!(
                    coordinator = %self.config.name(),
                    heap = snapshot.heap(),
                    height = snapshot.height(),
                    "Refreshed desk state"
                );

                self.bus.publish(DeskEvent::Updated(Arc::clone(&snapshot)));
                Ok(snapshot)
            }
            Err(err) => {
                let failed = Arc::new(UpdateFailed::new(err));
                *self.last_error.write() = Some(Arc::clone(&failed));
                self.last_update_success.store(false, Ordering::Release);

                tracing::warn!(
                    coordinator = %self.config.name(),
                    error = %failed,
                    "Desk refresh failed"
                );

                self.bus.publish(DeskEvent::UpdateFailed(Arc::clone(&failed)));
                Err(failed)
            }
        }
    }

    /// Reads the three sub-APIs in order, clearing each one's message
    /// buffer right before its read.
    async fn fetch(&self) -> Result<Snapshot, Error> {
        let backlight = self.desk.backlight();
        backlight.clear_message().await?;
        let light = backlight.read_state().await?;

        let system = self.desk.system();
        system.clear_message().await?;
        let heap = system.read_heap().await?;

        let legs = self.desk.legs();
        legs.clear_message().await?;
        let height = legs.get_height().await?;

        Ok(Snapshot::new(light, heap, height))
    }

    /// Refreshes immediately, then once per update interval, forever.
    ///
    /// Failures are published and logged; the loop keeps its cadence and
    /// never retries early. A refresh that overruns the interval delays the
    /// next tick instead of bunching ticks up.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.config.update_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            // outcome already published and logged
            let _ = self.refresh().await;
        }
    }
}

impl<D: Desk + 'static> DeskCoordinator<D> {
    /// Spawns [`run`](Self::run) on the current tokio runtime.
    ///
    /// Abort the returned handle to stop polling.
    #[must_use]
    pub fn spawn(self: &Arc<Self>) -> JoinHandle<()> {
        let coordinator = Arc::clone(self);
        tokio::spawn(async move { coordinator.run().await })
    }
}

impl<D: Desk> fmt::Debug for DeskCoordinator<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeskCoordinator")
            .field("config", &self.config)
            .field("data", &*self.data.read())
            .field("last_update_success", &self.last_update_success())
            .finish_non_exhaustive()
    }
}
