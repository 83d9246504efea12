// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::time::Duration;

/// Polling configuration for a [`DeskCoordinator`](super::DeskCoordinator).
///
/// # Examples
///
/// ```
/// use myrtdesk_lib::coordinator::CoordinatorConfig;
/// use std::time::Duration;
///
/// let config = CoordinatorConfig::new()
///     .with_update_interval(Duration::from_secs(10))
///     .with_refresh_timeout(Duration::from_secs(8));
///
/// assert_eq!(config.update_interval(), Duration::from_secs(10));
/// assert_eq!(config.name(), "MyrtDesk API");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    name: String,
    update_interval: Duration,
    refresh_timeout: Duration,
    event_capacity: usize,
}

impl CoordinatorConfig {
    /// Default name used in logs.
    pub const DEFAULT_NAME: &'static str = "MyrtDesk API";
    /// Default delay between refreshes.
    pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(5);
    /// Default deadline for all reads of one refresh.
    pub const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default event bus capacity.
    pub const DEFAULT_EVENT_CAPACITY: usize = 16;

    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            update_interval: Self::DEFAULT_UPDATE_INTERVAL,
            refresh_timeout: Self::DEFAULT_REFRESH_TIMEOUT,
            event_capacity: Self::DEFAULT_EVENT_CAPACITY,
        }
    }

    /// Sets the name used in logs.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the delay between refreshes.
    ///
    /// Zero is raised to one millisecond.
    #[must_use]
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Sets the deadline covering all reads of one refresh.
    #[must_use]
    pub fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    /// Sets how many events a slow subscriber may fall behind.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Returns the name used in logs.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the delay between refreshes.
    #[must_use]
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Returns the refresh deadline.
    #[must_use]
    pub fn refresh_timeout(&self) -> Duration {
        self.refresh_timeout
    }

    /// Returns the event bus capacity.
    #[must_use]
    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
