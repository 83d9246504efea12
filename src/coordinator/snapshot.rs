// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::protocol::BacklightState;

/// One poll cycle's consistent view of the desk.
///
/// Snapshots are produced by [`DeskCoordinator`](super::DeskCoordinator),
/// shared behind an `Arc` and never mutated; the next successful refresh
/// replaces them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    light: BacklightState,
    heap: u32,
    height: u16,
    fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Creates a snapshot stamped with the current time.
    #[must_use]
    pub fn new(light: BacklightState, heap: u32, height: u16) -> Self {
        Self {
            light,
            heap,
            height,
            fetched_at: Utc::now(),
        }
    }

    /// Returns the backlight state.
    #[must_use]
    pub fn light(&self) -> &BacklightState {
        &self.light
    }

    /// Returns the free heap in bytes.
    #[must_use]
    pub fn heap(&self) -> u32 {
        self.heap
    }

    /// Returns the desk height in millimetres.
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Returns when the last read of this cycle completed.
    #[must_use]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}
