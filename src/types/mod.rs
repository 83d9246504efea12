// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for desk state and light control.
//!
//! # Types
//!
//! - [`RgbColor`] - 8-bit RGB color as reported by the desk
//! - [`HsColor`] - Hue/saturation pair as used by the hub
//! - [`MiredsRange`] - Color temperature bounds and warmth byte mapping
//! - [`BacklightMode`] / [`ColorMode`] - Device and hub color modes
//! - [`Effect`] / [`EffectTable`] - Lighting patterns and their names

mod color;
mod effect;
mod mode;
mod rgb_color;

pub use color::MiredsRange;
pub use effect::{Effect, EffectTable};
pub use mode::{BacklightMode, ColorMode};
pub use rgb_color::{HsColor, RgbColor};
