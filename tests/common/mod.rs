// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory desk for coordinator and light tests.

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use myrtdesk_lib::error::{Error, ParseError, ProtocolError, ValueError};
use myrtdesk_lib::protocol::{Backlight, BacklightState, Desk, Legs, System};
use myrtdesk_lib::types::{Effect, RgbColor};

/// Every call the desk received, in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    ClearBacklight,
    ReadBacklight,
    ClearSystem,
    ReadHeap,
    ClearLegs,
    ReadHeight,
    Power(bool),
    Brightness(u8),
    Color(RgbColor),
    White(u8),
    Effect(Effect),
}

impl Call {
    pub fn is_write(self) -> bool {
        matches!(
            self,
            Self::Power(_) | Self::Brightness(_) | Self::Color(_) | Self::White(_) | Self::Effect(_)
        )
    }
}

/// The poll sequence of one refresh.
pub const POLL: [Call; 6] = [
    Call::ClearBacklight,
    Call::ReadBacklight,
    Call::ClearSystem,
    Call::ReadHeap,
    Call::ClearLegs,
    Call::ReadHeight,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Failure {
    Transport,
    Value,
    Parse,
}

impl Failure {
    fn error(self) -> Error {
        match self {
            Self::Transport => ProtocolError::ConnectionFailed("connection refused".into()).into(),
            Self::Value => ValueError::UnknownEffectOrdinal(9).into(),
            Self::Parse => ParseError::Json(serde_json::from_str::<u16>("\"tall\"").unwrap_err()).into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeDesk {
    calls: Mutex<Vec<Call>>,
    light: Mutex<BacklightState>,
    heap: Mutex<u32>,
    height: Mutex<u16>,
    backlight_failure: Mutex<Option<Failure>>,
    height_failure: Mutex<Option<Failure>>,
    fail_writes: Mutex<bool>,
    failing_calls: Mutex<Vec<Call>>,
    read_delay: Mutex<Duration>,
    write_delay: Mutex<Duration>,
}

impl FakeDesk {
    pub fn new() -> Self {
        let desk = Self::default();
        *desk.heap.lock().unwrap() = 120_000;
        *desk.height.lock().unwrap() = 750;
        desk
    }

    pub fn with_light(self, light: BacklightState) -> Self {
        *self.light.lock().unwrap() = light;
        self
    }

    pub fn set_light(&self, light: BacklightState) {
        *self.light.lock().unwrap() = light;
    }

    pub fn set_height(&self, height: u16) {
        *self.height.lock().unwrap() = height;
    }

    pub fn fail_backlight(&self, failure: Option<Failure>) {
        *self.backlight_failure.lock().unwrap() = failure;
    }

    pub fn fail_height(&self, failure: Option<Failure>) {
        *self.height_failure.lock().unwrap() = failure;
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    /// Fails every write of the same kind as `call`, whatever its value.
    pub fn fail_call(&self, call: Call) {
        self.failing_calls.lock().unwrap().push(call);
    }

    pub fn set_read_delay(&self, delay: Duration) {
        *self.read_delay.lock().unwrap() = delay;
    }

    pub fn set_write_delay(&self, delay: Duration) {
        *self.write_delay.lock().unwrap() = delay;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.is_write()).collect()
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls().into_iter().filter(|c| *c == call).count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn read_pause(&self) {
        let delay = *self.read_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn is_failing(&self, call: Call) -> bool {
        self.failing_calls
            .lock()
            .unwrap()
            .iter()
            .any(|failing| std::mem::discriminant(failing) == std::mem::discriminant(&call))
    }

    async fn write(&self, call: Call) -> Result<(), ProtocolError> {
        self.record(call);
        let delay = *self.write_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if *self.fail_writes.lock().unwrap() || self.is_failing(call) {
            return Err(ProtocolError::ConnectionFailed("write refused".into()));
        }
        if let Call::Power(enabled) = call {
            self.light.lock().unwrap().enabled = enabled;
        }
        Ok(())
    }
}

impl Backlight for FakeDesk {
    async fn read_state(&self) -> Result<BacklightState, Error> {
        self.record(Call::ReadBacklight);
        self.read_pause().await;
        let failure = *self.backlight_failure.lock().unwrap();
        match failure {
            Some(failure) => Err(failure.error()),
            None => Ok(self.light.lock().unwrap().clone()),
        }
    }

    async fn set_power(&self, enabled: bool) -> Result<(), ProtocolError> {
        self.write(Call::Power(enabled)).await
    }

    async fn set_brightness(&self, brightness: u8) -> Result<(), ProtocolError> {
        self.write(Call::Brightness(brightness)).await
    }

    async fn set_color(&self, color: RgbColor) -> Result<(), ProtocolError> {
        self.write(Call::Color(color)).await
    }

    async fn set_white(&self, warmness: u8) -> Result<(), ProtocolError> {
        self.write(Call::White(warmness)).await
    }

    async fn set_effect(&self, effect: Effect) -> Result<(), ProtocolError> {
        self.write(Call::Effect(effect)).await
    }

    async fn clear_message(&self) -> Result<(), ProtocolError> {
        self.record(Call::ClearBacklight);
        Ok(())
    }
}

impl System for FakeDesk {
    async fn read_heap(&self) -> Result<u32, Error> {
        self.record(Call::ReadHeap);
        self.read_pause().await;
        Ok(*self.heap.lock().unwrap())
    }

    async fn clear_message(&self) -> Result<(), ProtocolError> {
        self.record(Call::ClearSystem);
        Ok(())
    }
}

impl Legs for FakeDesk {
    async fn get_height(&self) -> Result<u16, Error> {
        self.record(Call::ReadHeight);
        self.read_pause().await;
        let failure = *self.height_failure.lock().unwrap();
        match failure {
            Some(failure) => Err(failure.error()),
            None => Ok(*self.height.lock().unwrap()),
        }
    }

    async fn clear_message(&self) -> Result<(), ProtocolError> {
        self.record(Call::ClearLegs);
        Ok(())
    }
}

impl Desk for FakeDesk {
    type Backlight = Self;
    type System = Self;
    type Legs = Self;

    fn backlight(&self) -> &Self {
        self
    }

    fn system(&self) -> &Self {
        self
    }

    fn legs(&self) -> &Self {
        self
    }
}

/// A lit backlight in white color mode.
pub fn lit() -> BacklightState {
    BacklightState {
        enabled: true,
        ..BacklightState::default()
    }
}
