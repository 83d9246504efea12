// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light entity state and commands.

use serde::Serialize;

use crate::types::{ColorMode, Effect, HsColor, MiredsRange, RgbColor};

/// State of the desk light as presented to the hub.
///
/// Commands update it optimistically; each snapshot replaces it.
///
/// # Examples
///
/// ```
/// use myrtdesk_lib::entity::LightState;
/// use myrtdesk_lib::types::{ColorMode, MiredsRange};
///
/// let state = LightState::initial(MiredsRange::default());
/// assert!(!state.is_on());
/// assert_eq!(state.brightness(), 255);
/// assert_eq!(state.color_mode(), ColorMode::Hs);
/// assert!(!state.available());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightState {
    pub(crate) is_on: bool,
    pub(crate) brightness: u8,
    pub(crate) rgb: RgbColor,
    pub(crate) color_temp: u16,
    pub(crate) effect: String,
    pub(crate) color_mode: ColorMode,
    pub(crate) available: bool,
}

impl LightState {
    /// State before the first snapshot: off, full brightness, white.
    #[must_use]
    pub fn initial(range: MiredsRange) -> Self {
        Self {
            is_on: false,
            brightness: u8::MAX,
            rgb: RgbColor::white(),
            color_temp: range.min(),
            effect: Effect::ALL[0].display_name().to_string(),
            color_mode: ColorMode::Hs,
            available: false,
        }
    }

    /// Returns `true` if the light is on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Returns the brightness (0-255).
    #[must_use]
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Returns the cached RGB color.
    #[must_use]
    pub fn rgb_color(&self) -> RgbColor {
        self.rgb
    }

    /// Returns the color as hue/saturation.
    #[must_use]
    pub fn hs_color(&self) -> HsColor {
        self.rgb.to_hs()
    }

    /// Returns the color temperature in mireds.
    #[must_use]
    pub fn color_temp(&self) -> u16 {
        self.color_temp
    }

    /// Returns the active effect's display name.
    #[must_use]
    pub fn effect(&self) -> &str {
        &self.effect
    }

    /// Returns the active color mode.
    #[must_use]
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Returns `false` after a failed write, until the next snapshot or
    /// successful write.
    #[must_use]
    pub fn available(&self) -> bool {
        self.available
    }
}

/// A turn-on command with any subset of light attributes.
///
/// # Examples
///
/// ```
/// use myrtdesk_lib::entity::TurnOn;
/// use myrtdesk_lib::types::HsColor;
///
/// let command = TurnOn::new()
///     .with_brightness(128)
///     .with_hs_color(HsColor::new(30.0, 80.0));
///
/// assert_eq!(command.brightness(), Some(128));
/// assert!(command.color_temp().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnOn {
    brightness: Option<u8>,
    color_temp: Option<u16>,
    hs_color: Option<HsColor>,
    effect: Option<String>,
}

impl TurnOn {
    /// Creates a bare turn-on command.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the brightness (0-255).
    #[must_use]
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = Some(brightness);
        self
    }

    /// Sets the color temperature in mireds.
    #[must_use]
    pub fn with_color_temp(mut self, mireds: u16) -> Self {
        self.color_temp = Some(mireds);
        self
    }

    /// Sets the hue/saturation color.
    #[must_use]
    pub fn with_hs_color(mut self, hs: HsColor) -> Self {
        self.hs_color = Some(hs);
        self
    }

    /// Sets the effect by display name.
    #[must_use]
    pub fn with_effect(mut self, name: impl Into<String>) -> Self {
        self.effect = Some(name.into());
        self
    }

    /// Returns the requested brightness.
    #[must_use]
    pub fn brightness(&self) -> Option<u8> {
        self.brightness
    }

    /// Returns the requested color temperature.
    #[must_use]
    pub fn color_temp(&self) -> Option<u16> {
        self.color_temp
    }

    /// Returns the requested hue/saturation color.
    #[must_use]
    pub fn hs_color(&self) -> Option<HsColor> {
        self.hs_color
    }

    /// Returns the requested effect name.
    #[must_use]
    pub fn effect(&self) -> Option<&str> {
        self.effect.as_deref()
    }
}
