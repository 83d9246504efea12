// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting poll outcomes.

use tokio::sync::broadcast;

use super::DeskEvent;

/// Default channel capacity for the event bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Event bus for broadcasting desk events to multiple subscribers.
///
/// Backed by a tokio broadcast channel. A subscriber that falls more than
/// `capacity` events behind receives `RecvError::Lagged` and skips ahead;
/// since every `Updated` event carries a complete snapshot, only the latest
/// one matters.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use myrtdesk_lib::coordinator::Snapshot;
/// use myrtdesk_lib::event::{DeskEvent, EventBus};
/// use myrtdesk_lib::protocol::BacklightState;
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// let snapshot = Snapshot::new(BacklightState::default(), 120_000, 750);
/// bus.publish(DeskEvent::Updated(Arc::new(snapshot)));
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DeskEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribes to events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeskEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event and returns how many subscribers received it.
    ///
    /// Having no subscribers is not an error.
    pub fn publish(&self, event: DeskEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
