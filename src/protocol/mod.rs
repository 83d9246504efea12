// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device handle for a `MyrtDesk` controller.
//!
//! A desk exposes three sub-APIs, each behind its own trait:
//!
//! - [`Backlight`]: LED strip state and writes
//! - [`System`]: health diagnostics
//! - [`Legs`]: height adjustment
//!
//! [`Desk`] bundles them. The coordinator and entities only depend on these
//! traits; [`HttpDesk`] is the bundled HTTP implementation.
//!
//! Every sub-API can buffer a pending message from an earlier exchange.
//! Readers call `clear_message` right before a read so that a stale buffer
//! is never mistaken for the answer.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpBacklight, HttpConfig, HttpDesk, HttpLegs, HttpSystem};

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ProtocolError, ValueError};
use crate::types::{BacklightMode, Effect, RgbColor};

/// Backlight state as reported by the desk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BacklightState {
    /// Whether the strip is powered.
    pub enabled: bool,
    /// Brightness (0-255).
    pub brightness: u8,
    /// Current RGB color.
    pub color: RgbColor,
    /// White channel warmth (0-255).
    pub warmness: u8,
    /// Active channel.
    pub mode: BacklightMode,
    /// Active effect.
    pub effect: Effect,
}

impl Default for BacklightState {
    fn default() -> Self {
        Self {
            enabled: false,
            brightness: u8::MAX,
            color: RgbColor::white(),
            warmness: 0,
            mode: BacklightMode::Color,
            effect: Effect::Static,
        }
    }
}

/// Backlight state in its wire encoding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawBacklightState {
    /// Power flag.
    pub enabled: bool,
    /// Brightness (0-255).
    pub brightness: u8,
    /// RGB channels.
    pub color: [u8; 3],
    /// White channel warmth (0-255).
    pub warmness: u8,
    /// Raw mode field.
    pub mode: u8,
    /// Effect ordinal.
    pub effect: u8,
}

impl TryFrom<RawBacklightState> for BacklightState {
    type Error = ValueError;

    fn try_from(raw: RawBacklightState) -> Result<Self, Self::Error> {
        Ok(Self {
            enabled: raw.enabled,
            brightness: raw.brightness,
            color: RgbColor::from(raw.color),
            warmness: raw.warmness,
            mode: BacklightMode::from_raw(raw.mode),
            effect: Effect::from_ordinal(raw.effect)?,
        })
    }
}

impl From<&BacklightState> for RawBacklightState {
    fn from(state: &BacklightState) -> Self {
        Self {
            enabled: state.enabled,
            brightness: state.brightness,
            color: state.color.to_array(),
            warmness: state.warmness,
            mode: state.mode.to_raw(),
            effect: state.effect.ordinal(),
        }
    }
}

/// Backlight sub-API.
pub trait Backlight: Send + Sync {
    /// Reads the current backlight state.
    fn read_state(&self) -> impl Future<Output = Result<BacklightState, Error>> + Send;

    /// Turns the strip on or off.
    fn set_power(&self, enabled: bool) -> impl Future<Output = Result<(), ProtocolError>> + Send;

    /// Sets the brightness (0-255).
    fn set_brightness(
        &self,
        brightness: u8,
    ) -> impl Future<Output = Result<(), ProtocolError>> + Send;

    /// Switches to the color channel with the given color.
    fn set_color(&self, color: RgbColor)
    -> impl Future<Output = Result<(), ProtocolError>> + Send;

    /// Switches to the white channel with the given warmth (0-255).
    fn set_white(&self, warmness: u8) -> impl Future<Output = Result<(), ProtocolError>> + Send;

    /// Starts an effect.
    fn set_effect(&self, effect: Effect)
    -> impl Future<Output = Result<(), ProtocolError>> + Send;

    /// Drops any pending message buffered by the backlight.
    fn clear_message(&self) -> impl Future<Output = Result<(), ProtocolError>> + Send;
}

/// System diagnostics sub-API.
pub trait System: Send + Sync {
    /// Reads the free heap in bytes.
    fn read_heap(&self) -> impl Future<Output = Result<u32, Error>> + Send;

    /// Drops any pending message buffered by the system API.
    fn clear_message(&self) -> impl Future<Output = Result<(), ProtocolError>> + Send;
}

/// Legs sub-API.
pub trait Legs: Send + Sync {
    /// Reads the desk height in millimetres.
    fn get_height(&self) -> impl Future<Output = Result<u16, Error>> + Send;

    /// Drops any pending message buffered by the legs API.
    fn clear_message(&self) -> impl Future<Output = Result<(), ProtocolError>> + Send;
}

/// A desk with all three sub-APIs.
pub trait Desk: Send + Sync {
    /// Backlight implementation.
    type Backlight: Backlight;
    /// System implementation.
    type System: System;
    /// Legs implementation.
    type Legs: Legs;

    /// Returns the backlight sub-API.
    fn backlight(&self) -> &Self::Backlight;

    /// Returns the system sub-API.
    fn system(&self) -> &Self::System;

    /// Returns the legs sub-API.
    fn legs(&self) -> &Self::Legs;
}
