// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Poll outcome notifications.
//!
//! The coordinator publishes one [`DeskEvent`] per refresh on an
//! [`EventBus`]. Entities subscribe to re-render from the new snapshot.

mod desk_event;
mod event_bus;

pub use desk_event::DeskEvent;
pub use event_bus::EventBus;
