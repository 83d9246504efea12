// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color temperature bounds and the warmth byte mapping.
//!
//! The desk encodes white-light temperature as a single "warmth" byte
//! (0-255). The hub's light model uses mireds. [`MiredsRange`] maps the
//! byte linearly onto `[min, max]` mireds and back, rounding to the
//! nearest integer in both directions so that a byte → mireds → byte →
//! mireds trip lands on the same mireds value.

use crate::error::ValueError;

/// Inclusive mireds bounds of the backlight's white channel.
///
/// # Examples
///
/// ```
/// use myrtdesk_lib::types::MiredsRange;
///
/// let range = MiredsRange::default();
/// assert_eq!(range.min(), 166);
/// assert_eq!(range.max(), 400);
///
/// assert_eq!(range.bytes_to_mireds(128), 283);
/// assert_eq!(range.mireds_to_byte(400), 255);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MiredsRange {
    min: u16,
    max: u16,
}

impl MiredsRange {
    /// Coolest temperature the backlight reaches (~6000K).
    pub const DEFAULT_MIN: u16 = 166;

    /// Warmest temperature the backlight reaches (2500K).
    pub const DEFAULT_MAX: u16 = 400;

    /// Creates a new range.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidMiredsRange` if `min` is not below `max`.
    pub fn new(min: u16, max: u16) -> Result<Self, ValueError> {
        if min >= max {
            return Err(ValueError::InvalidMiredsRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn min(&self) -> u16 {
        self.min
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn max(&self) -> u16 {
        self.max
    }

    /// Returns the width of the range.
    #[must_use]
    pub const fn span(&self) -> u16 {
        self.max - self.min
    }

    /// Clamps a mireds value into the range.
    #[must_use]
    pub fn clamp(&self, mireds: u16) -> u16 {
        mireds.clamp(self.min, self.max)
    }

    /// Converts a warmth byte to mireds.
    ///
    /// `round(byte / 255 * span) + min`
    #[must_use]
    pub fn bytes_to_mireds(&self, byte: u8) -> u16 {
        let span = u32::from(self.span());
        let scaled = (u32::from(byte) * span + 127) / 255;
        // scaled <= span, which fits in u16
        #[allow(clippy::cast_possible_truncation)]
        let scaled = scaled as u16;
        self.min + scaled
    }

    /// Converts mireds to a warmth byte.
    ///
    /// Values outside the range are clamped first.
    /// `round((mireds - min) / span * 255)`
    #[must_use]
    pub fn mireds_to_byte(&self, mireds: u16) -> u8 {
        let span = u32::from(self.span());
        let offset = u32::from(self.clamp(mireds) - self.min);
        let byte = (offset * 255 + span / 2) / span;
        u8::try_from(byte).unwrap_or(u8::MAX)
    }
}

impl Default for MiredsRange {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}
