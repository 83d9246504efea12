// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Backlight effects and their display names.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::error::ValueError;

/// A device-side lighting pattern.
///
/// The discriminant is the ordinal the desk uses on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[repr(u8)]
pub enum Effect {
    /// Solid color or white light.
    Static = 0,
    /// Full hue cycle along the strip.
    Rainbow = 1,
    /// Running gradient.
    Flow = 2,
    /// Slow warm pulsation.
    VelvetAnalog = 3,
    /// Drifting green and violet waves.
    Aurora = 4,
}

impl Effect {
    /// All effects in ordinal order.
    pub const ALL: [Self; 5] = [
        Self::Static,
        Self::Rainbow,
        Self::Flow,
        Self::VelvetAnalog,
        Self::Aurora,
    ];

    /// Returns the wire ordinal.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Looks up an effect by its wire ordinal.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownEffectOrdinal` for ordinals past the last effect.
    pub fn from_ordinal(ordinal: u8) -> Result<Self, ValueError> {
        Self::ALL
            .get(usize::from(ordinal))
            .copied()
            .ok_or(ValueError::UnknownEffectOrdinal(ordinal))
    }

    /// Returns the device API member name.
    #[must_use]
    pub const fn raw_name(self) -> &'static str {
        match self {
            Self::Static => "STATIC",
            Self::Rainbow => "RAINBOW",
            Self::Flow => "FLOW",
            Self::VelvetAnalog => "VELVET_ANALOG",
            Self::Aurora => "AURORA",
        }
    }

    /// Returns the name shown in the hub's effect list.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        EffectTable::global().name(self)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl TryFrom<u8> for Effect {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_ordinal(value)
    }
}

/// Lookup between effects and their display names.
///
/// Names are derived from [`Effect::raw_name`] by lower-casing it and
/// upper-casing the first character, so `VELVET_ANALOG` is shown as
/// `Velvet_analog`. Position `i` of [`names`](Self::names) always holds the
/// effect with ordinal `i`.
///
/// # Examples
///
/// ```
/// use myrtdesk_lib::types::{Effect, EffectTable};
///
/// let table = EffectTable::global();
/// assert_eq!(table.names()[0], "Static");
/// assert_eq!(table.lookup("Velvet_analog"), Some(Effect::VelvetAnalog));
/// assert_eq!(table.lookup("velvet_analog"), None);
/// ```
#[derive(Debug)]
pub struct EffectTable {
    names: Vec<String>,
    by_name: HashMap<String, Effect>,
}

static EFFECT_TABLE: LazyLock<EffectTable> = LazyLock::new(EffectTable::build);

impl EffectTable {
    /// Returns the shared table, building it on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        &EFFECT_TABLE
    }

    fn build() -> Self {
        let names: Vec<String> = Effect::ALL
            .iter()
            .map(|effect| capitalize(effect.raw_name()))
            .collect();
        let by_name = names
            .iter()
            .cloned()
            .zip(Effect::ALL)
            .collect::<HashMap<_, _>>();
        Self { names, by_name }
    }

    /// Returns display names in ordinal order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the display name of an effect.
    #[must_use]
    pub fn name(&self, effect: Effect) -> &str {
        &self.names[usize::from(effect.ordinal())]
    }

    /// Finds the effect with the given display name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Effect> {
        self.by_name.get(name).copied()
    }

    /// Like [`lookup`](Self::lookup), but fails with a `ValueError`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownEffect` if no effect has this name.
    pub fn resolve(&self, name: &str) -> Result<Effect, ValueError> {
        self.lookup(name)
            .ok_or_else(|| ValueError::UnknownEffect(name.to_string()))
    }
}

fn capitalize(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
