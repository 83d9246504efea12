// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The desk backlight as a hub light entity.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::coordinator::{DeskCoordinator, Snapshot};
use crate::error::{ProtocolError, ValueError};
use crate::event::DeskEvent;
use crate::protocol::{Backlight, Desk};
use crate::types::{ColorMode, Effect, EffectTable, MiredsRange, RgbColor};

use super::{DeviceInfo, LightState, TurnOn};

/// Writes queued by one turn-on command.
#[derive(Debug, Default)]
struct WriteBatch {
    power: Option<bool>,
    brightness: Option<u8>,
    tone: Option<ToneWrite>,
}

/// Color and white writes are mutually exclusive within a command.
#[derive(Debug, Clone, Copy)]
enum ToneWrite {
    White(u8),
    Color(RgbColor),
}

/// Light entity backed by the desk's backlight.
///
/// Reads come from coordinator snapshots via
/// [`handle_snapshot`](Self::handle_snapshot); commands go straight to the
/// backlight. Local state is updated optimistically before a write is
/// confirmed and is not rolled back when it fails: the entity is marked
/// unavailable instead, and the next snapshot restores the device's view.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use myrtdesk_lib::coordinator::{CoordinatorConfig, DeskCoordinator};
/// use myrtdesk_lib::entity::{DeskLight, TurnOn};
/// use myrtdesk_lib::protocol::HttpConfig;
///
/// # async fn example() -> myrtdesk_lib::Result<()> {
/// let desk = Arc::new(HttpConfig::new("192.168.1.60").into_desk()?);
/// let coordinator = Arc::new(DeskCoordinator::new(Arc::clone(&desk), CoordinatorConfig::new()));
/// let light = Arc::new(DeskLight::new(desk));
///
/// let _listener = light.attach(&coordinator);
/// let _poller = coordinator.spawn();
///
/// light.turn_on(TurnOn::new().with_brightness(180)).await?;
/// # Ok(())
/// # }
/// ```
pub struct DeskLight<D: Desk> {
    desk: Arc<D>,
    mireds: MiredsRange,
    state: RwLock<LightState>,
    publisher: watch::Sender<LightState>,
}

impl<D: Desk> DeskLight<D> {
    /// Unique id of the light entity.
    pub const UNIQUE_ID: &'static str = "myrt_desk_light";
    /// Display name of the light entity.
    pub const NAME: &'static str = "MyrtDesk Backlight";
    /// Icon of the light entity.
    pub const ICON: &'static str = "mdi:led-strip-variant";

    /// Creates a light with the default 166-400 mireds range.
    #[must_use]
    pub fn new(desk: Arc<D>) -> Self {
        Self::with_mireds_range(desk, MiredsRange::default())
    }

    /// Creates a light with custom color temperature bounds.
    #[must_use]
    pub fn with_mireds_range(desk: Arc<D>, mireds: MiredsRange) -> Self {
        let state = LightState::initial(mireds);
        let (publisher, _) = watch::channel(state.clone());
        Self {
            desk,
            mireds,
            state: RwLock::new(state),
            publisher,
        }
    }

    // ========== Metadata ==========

    /// Returns the unique id.
    #[must_use]
    pub fn unique_id(&self) -> &'static str {
        Self::UNIQUE_ID
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Returns the icon.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        Self::ICON
    }

    /// Returns the device this entity belongs to.
    #[must_use]
    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo::default()
    }

    /// Returns the color modes the light accepts.
    #[must_use]
    pub fn supported_color_modes(&self) -> &'static [ColorMode] {
        &ColorMode::SUPPORTED
    }

    /// Returns effect names in ordinal order.
    #[must_use]
    pub fn effect_list(&self) -> &'static [String] {
        EffectTable::global().names()
    }

    /// Returns the coolest supported color temperature.
    #[must_use]
    pub fn min_mireds(&self) -> u16 {
        self.mireds.min()
    }

    /// Returns the warmest supported color temperature.
    #[must_use]
    pub fn max_mireds(&self) -> u16 {
        self.mireds.max()
    }

    // ========== State ==========

    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> LightState {
        self.state.read().clone()
    }

    /// Returns `true` if the light is available.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.state.read().available
    }

    /// Watches the state. A new value is published on every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LightState> {
        self.publisher.subscribe()
    }

    fn publish(&self) {
        let state = self.state.read().clone();
        self.publisher.send_replace(state);
    }

    /// Replaces local state with the snapshot's backlight state.
    pub fn handle_snapshot(&self, snapshot: &Snapshot) {
        let light = snapshot.light();
        {
            let mut state = self.state.write();
            state.brightness = light.brightness;
            state.is_on = light.enabled;
            state.rgb = light.color;
            state.effect = light.effect.display_name().to_string();
            state.color_temp = self.mireds.bytes_to_mireds(light.warmness);
            state.color_mode = ColorMode::from(light.mode);
            state.available = true;
        }
        self.publish();
    }

    /// Marks the light unavailable after a failed refresh.
    ///
    /// Cached attributes are kept; the next snapshot makes it available
    /// again.
    pub fn handle_update_failed(&self) {
        self.state.write().available = false;
        self.publish();
    }

    // ========== Commands ==========

    /// Turns the light on, applying any attributes in the command.
    ///
    /// An effect takes priority: when one is given, the power write (if the
    /// light was off) is awaited, the effect is written on its own, and
    /// brightness and color in the same command are ignored. Otherwise
    /// brightness and either color temperature or hue/saturation are
    /// written concurrently. A hue/saturation that maps to the cached RGB
    /// color is not sent.
    ///
    /// Transport failures mark the light unavailable and are not returned.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownEffect` if the effect name is not in
    /// [`effect_list`](Self::effect_list). Nothing is written in that case.
    pub async fn turn_on(&self, command: TurnOn) -> Result<(), ValueError> {
        let effect = command
            .effect()
            .map(|name| EffectTable::global().resolve(name))
            .transpose()?;

        let batch = self.stage(&command, effect);

        let result = match effect {
            Some(effect) => self.send_effect(batch.power, effect).await,
            None => {
                self.publish();
                self.send_batch(batch).await
            }
        };

        self.settle(result);
        Ok(())
    }

    /// Applies the command to local state and returns the writes it needs.
    fn stage(&self, command: &TurnOn, effect: Option<Effect>) -> WriteBatch {
        let mut batch = WriteBatch::default();
        let mut state = self.state.write();

        if !state.is_on {
            state.is_on = true;
            batch.power = Some(true);
        }

        if let Some(effect) = effect {
            state.effect = effect.display_name().to_string();
            return batch;
        }

        if let Some(brightness) = command.brightness() {
            state.brightness = brightness;
            batch.brightness = Some(brightness);
        }

        if let Some(mireds) = command.color_temp() {
            let mireds = self.mireds.clamp(mireds);
            state.color_temp = mireds;
            state.color_mode = ColorMode::ColorTemp;
            batch.tone = Some(ToneWrite::White(self.mireds.mireds_to_byte(mireds)));
        } else if let Some(hs) = command.hs_color() {
            let rgb = RgbColor::from_hs(hs);
            if rgb != state.rgb {
                state.rgb = rgb;
                state.color_mode = ColorMode::Hs;
                batch.tone = Some(ToneWrite::Color(rgb));
            }
        }

        batch
    }

    async fn send_effect(&self, power: Option<bool>, effect: Effect) -> Result<(), ProtocolError> {
        let backlight = self.desk.backlight();
        if let Some(enabled) = power {
            backlight.set_power(enabled).await?;
        }
        backlight.set_effect(effect).await
    }

    async fn send_batch(&self, batch: WriteBatch) -> Result<(), ProtocolError> {
        let backlight = self.desk.backlight();

        let (power, brightness, tone) = tokio::join!(
            async {
                match batch.power {
                    Some(enabled) => backlight.set_power(enabled).await,
                    None => Ok(()),
                }
            },
            async {
                match batch.brightness {
                    Some(brightness) => backlight.set_brightness(brightness).await,
                    None => Ok(()),
                }
            },
            async {
                match batch.tone {
                    Some(ToneWrite::White(warmness)) => backlight.set_white(warmness).await,
                    Some(ToneWrite::Color(color)) => backlight.set_color(color).await,
                    None => Ok(()),
                }
            },
        );

        power.and(brightness).and(tone)
    }

    /// Turns the light off.
    ///
    /// The local off flag is set before the write and stays set if the
    /// write fails; the light is then marked unavailable.
    pub async fn turn_off(&self) {
        self.state.write().is_on = false;
        let result = self.desk.backlight().set_power(false).await;
        self.settle(result);
    }

    fn settle(&self, result: Result<(), ProtocolError>) {
        let available = match result {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(entity = Self::UNIQUE_ID, error = %err, "Backlight write failed");
                false
            }
        };
        self.state.write().available = available;
        self.publish();
    }
}

impl<D: Desk + 'static> DeskLight<D> {
    /// Follows a coordinator: applies its current snapshot, if any, then
    /// every snapshot it publishes. A failed refresh marks the light
    /// unavailable until the next snapshot.
    ///
    /// The task ends when the coordinator is dropped.
    #[must_use]
    pub fn attach<C: Desk>(self: &Arc<Self>, coordinator: &DeskCoordinator<C>) -> JoinHandle<()> {
        let mut events = coordinator.subscribe();
        if let Some(snapshot) = coordinator.data() {
            self.handle_snapshot(&snapshot);
            if !coordinator.last_update_success() {
                self.handle_update_failed();
            }
        }

        let light = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(DeskEvent::Updated(snapshot)) => light.handle_snapshot(&snapshot),
                    Ok(DeskEvent::UpdateFailed(_)) => light.handle_update_failed(),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(entity = Self::UNIQUE_ID, skipped, "Skipped stale snapshots");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}

impl<D: Desk> fmt::Debug for DeskLight<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeskLight")
            .field("mireds", &self.mireds)
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}
