// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Desk event types.

use std::sync::Arc;

use crate::coordinator::Snapshot;
use crate::error::UpdateFailed;

/// Outcome of one poll cycle, as seen by subscribers.
///
/// Exactly one event is published per refresh.
#[derive(Debug, Clone)]
pub enum DeskEvent {
    /// A refresh succeeded and produced a new snapshot.
    Updated(Arc<Snapshot>),

    /// A refresh failed. The previous snapshot is still current.
    UpdateFailed(Arc<UpdateFailed>),
}

impl DeskEvent {
    /// Returns the snapshot carried by an `Updated` event.
    #[must_use]
    pub fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        match self {
            Self::Updated(snapshot) => Some(snapshot),
            Self::UpdateFailed(_) => None,
        }
    }

    /// Returns `true` for `UpdateFailed` events.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::UpdateFailed(_))
    }
}
