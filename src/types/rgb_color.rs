// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB and hue/saturation colors.
//!
//! The desk speaks RGB triples while the hub's light model speaks
//! hue/saturation. Conversion always assumes full value (brightness is a
//! separate channel on both sides).

use std::fmt;

/// RGB color with 8-bit channels (0-255).
///
/// # Examples
///
/// ```
/// use myrtdesk_lib::types::RgbColor;
///
/// let color = RgbColor::new(255, 128, 0);
/// assert_eq!(color.red(), 255);
/// assert_eq!(color.green(), 128);
/// assert_eq!(color.blue(), 0);
/// assert_eq!(color.to_string(), "#FF8000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Returns the channels as an array, in wire order.
    #[must_use]
    pub const fn to_array(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Converts this color to hue/saturation, dropping its value.
    ///
    /// # Examples
    ///
    /// ```
    /// use myrtdesk_lib::types::RgbColor;
    ///
    /// let hs = RgbColor::new(0, 0, 255).to_hs();
    /// assert_eq!(hs.hue(), 240.0);
    /// assert_eq!(hs.saturation(), 100.0);
    /// ```
    #[must_use]
    pub fn to_hs(&self) -> HsColor {
        let (hue, saturation) = rgb_to_hs(self.red, self.green, self.blue);
        HsColor::new(hue, saturation)
    }

    /// Creates an RGB color from a hue/saturation pair at full value.
    ///
    /// # Examples
    ///
    /// ```
    /// use myrtdesk_lib::types::{HsColor, RgbColor};
    ///
    /// let rgb = RgbColor::from_hs(HsColor::new(0.0, 0.0));
    /// assert_eq!(rgb, RgbColor::white());
    /// ```
    #[must_use]
    pub fn from_hs(hs: HsColor) -> Self {
        let (r, g, b) = hs_to_rgb(hs.hue(), hs.saturation());
        Self::new(r, g, b)
    }

    /// Creates a white color.
    #[must_use]
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }
}

impl Default for RgbColor {
    fn default() -> Self {
        Self::white()
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<[u8; 3]> for RgbColor {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

/// Hue/saturation pair as used by the hub's light model.
///
/// Hue is in degrees and wraps at 360, saturation is a percentage.
/// Out-of-range input is clamped on construction, including when
/// deserialized from a `[hue, saturation]` pair.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "(f32, f32)", into = "(f32, f32)")]
pub struct HsColor {
    hue: f32,
    saturation: f32,
}

impl HsColor {
    /// Creates a new hue/saturation pair.
    #[must_use]
    pub fn new(hue: f32, saturation: f32) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
            saturation: saturation.clamp(0.0, 100.0),
        }
    }

    /// Returns the hue in degrees (0-360).
    #[must_use]
    pub const fn hue(&self) -> f32 {
        self.hue
    }

    /// Returns the saturation in percent (0-100).
    #[must_use]
    pub const fn saturation(&self) -> f32 {
        self.saturation
    }
}

impl From<(f32, f32)> for HsColor {
    fn from((hue, saturation): (f32, f32)) -> Self {
        Self::new(hue, saturation)
    }
}

impl From<HsColor> for (f32, f32) {
    fn from(hs: HsColor) -> Self {
        (hs.hue, hs.saturation)
    }
}

/// Returns (hue: 0-360, saturation: 0-100).
fn rgb_to_hs(r: u8, g: u8, b: u8) -> (f32, f32) {
    let r = f32::from(r) / 255.0;
    let g = f32::from(g) / 255.0;
    let b = f32::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let saturation = if max == 0.0 { 0.0 } else { delta / max * 100.0 };

    let hue = if delta < f32::EPSILON {
        0.0
    } else if (max - r).abs() < f32::EPSILON {
        (60.0 * ((g - b) / delta)).rem_euclid(360.0)
    } else if (max - g).abs() < f32::EPSILON {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };

    (round3(hue), round3(saturation))
}

/// Takes (hue: 0-360, saturation: 0-100), returns 8-bit channels.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]
fn hs_to_rgb(h: f32, s: f32) -> (u8, u8, u8) {
    let s = s / 100.0;
    let c = s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = 1.0 - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r), channel(g), channel(b))
}

fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}
