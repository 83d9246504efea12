// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color modes on both sides of the translation.

use std::fmt;

/// Which channel drives the backlight, as reported by the desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub enum BacklightMode {
    /// RGB color channel.
    #[default]
    Color,
    /// White channel with warmth.
    White,
}

impl BacklightMode {
    /// Decodes the raw mode field. Zero is color, anything else is white.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        if raw == 0 { Self::Color } else { Self::White }
    }

    /// Returns the raw mode field.
    #[must_use]
    pub const fn to_raw(self) -> u8 {
        match self {
            Self::Color => 0,
            Self::White => 1,
        }
    }
}

/// Color mode of the hub light entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub enum ColorMode {
    /// Hue and saturation.
    #[default]
    #[serde(rename = "hs")]
    Hs,
    /// Color temperature in mireds.
    #[serde(rename = "color_temp")]
    ColorTemp,
}

impl ColorMode {
    /// Modes the desk light supports.
    pub const SUPPORTED: [Self; 2] = [Self::Hs, Self::ColorTemp];

    /// Returns the hub's identifier for this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hs => "hs",
            Self::ColorTemp => "color_temp",
        }
    }
}

impl From<BacklightMode> for ColorMode {
    fn from(mode: BacklightMode) -> Self {
        match mode {
            BacklightMode::Color => Self::Hs,
            BacklightMode::White => Self::ColorTemp,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
