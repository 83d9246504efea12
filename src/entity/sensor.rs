// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only sensors fed by coordinator snapshots.

use crate::coordinator::{DeskCoordinator, Snapshot};
use crate::protocol::Desk;

/// A scalar exposed by the desk as a hub sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeskSensor {
    /// Free heap of the controller.
    Heap,
    /// Desk surface height.
    Height,
}

impl DeskSensor {
    /// All sensors.
    pub const ALL: [Self; 2] = [Self::Heap, Self::Height];

    /// Returns the unique id.
    #[must_use]
    pub const fn unique_id(self) -> &'static str {
        match self {
            Self::Heap => "myrt_desk_heap",
            Self::Height => "myrt_desk_height",
        }
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Heap => "MyrtDesk Free Heap",
            Self::Height => "MyrtDesk Height",
        }
    }

    /// Returns the unit of measurement.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Heap => "B",
            Self::Height => "mm",
        }
    }

    /// Returns the icon.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Heap => "mdi:memory",
            Self::Height => "mdi:human-male-height-variant",
        }
    }

    /// Returns `true` for diagnostic sensors.
    #[must_use]
    pub const fn is_diagnostic(self) -> bool {
        matches!(self, Self::Heap)
    }

    /// Reads this sensor's value from a snapshot.
    #[must_use]
    pub fn native_value(self, snapshot: Option<&Snapshot>) -> Option<u32> {
        snapshot.map(|snapshot| match self {
            Self::Heap => snapshot.heap(),
            Self::Height => u32::from(snapshot.height()),
        })
    }

    /// Reads this sensor from a coordinator.
    ///
    /// Returns `None` while the coordinator's last refresh failed, even if
    /// an older snapshot exists.
    #[must_use]
    pub fn read<D: Desk>(self, coordinator: &DeskCoordinator<D>) -> Option<u32> {
        if !coordinator.last_update_success() {
            return None;
        }
        self.native_value(coordinator.data().as_deref())
    }
}
