// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hub entities backed by the desk.
//!
//! - [`DeskLight`] - the backlight as a light with color, color temperature
//!   and effects
//! - [`DeskSensor`] - heap and height readings
//!
//! All entities belong to the same [`DeviceInfo`].

mod light;
mod light_state;
mod sensor;

pub use light::DeskLight;
pub use light_state::{LightState, TurnOn};
pub use sensor::DeskSensor;

use serde::Serialize;

/// Device registry entry shared by all desk entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// Integration domain and device id.
    pub identifiers: (&'static str, &'static str),
    /// Device name.
    pub name: &'static str,
    /// Manufacturer.
    pub manufacturer: &'static str,
    /// Model.
    pub model: &'static str,
}

impl DeviceInfo {
    /// Integration domain.
    pub const DOMAIN: &'static str = "myrt_desk";
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            identifiers: (Self::DOMAIN, "myrt_desk"),
            name: "MyrtDesk",
            manufacturer: "MyrtIO",
            model: "MyrtDesk",
        }
    }
}
