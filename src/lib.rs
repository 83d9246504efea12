// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `MyrtDesk` Lib - poll and control a `MyrtDesk` from a home-automation hub.
//!
//! A `MyrtDesk` controller exposes three sub-APIs: the backlight LED strip,
//! system diagnostics and the legs. This library polls all three on a fixed
//! interval, publishes consistent snapshots, and maps the backlight onto a
//! hub light entity (mireds color temperature, hue/saturation color, named
//! effects).
//!
//! # Components
//!
//! - [`coordinator`]: periodic refresh with a single deadline per cycle
//! - [`entity`]: the light entity and read-only sensors
//! - [`protocol`]: device handle traits and the HTTP implementation
//! - [`types`]: colors, color temperature mapping, effects
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use myrtdesk_lib::coordinator::{CoordinatorConfig, DeskCoordinator};
//! use myrtdesk_lib::entity::{DeskLight, TurnOn};
//! use myrtdesk_lib::protocol::HttpConfig;
//! use myrtdesk_lib::types::HsColor;
//!
//! #[tokio::main]
//! async fn main() -> myrtdesk_lib::Result<()> {
//!     let desk = Arc::new(HttpConfig::new("192.168.1.60").into_desk()?);
//!
//!     let coordinator = Arc::new(DeskCoordinator::new(
//!         Arc::clone(&desk),
//!         CoordinatorConfig::new(),
//!     ));
//!     let light = Arc::new(DeskLight::new(desk));
//!
//!     let _listener = light.attach(&coordinator);
//!     let _poller = coordinator.spawn();
//!
//!     light
//!         .turn_on(
//!             TurnOn::new()
//!                 .with_brightness(200)
//!                 .with_hs_color(HsColor::new(30.0, 80.0)),
//!         )
//!         .await?;
//!
//!     let mut state = light.subscribe();
//!     while state.changed().await.is_ok() {
//!         println!("{:?}", *state.borrow_and_update());
//!     }
//!     Ok(())
//! }
//! ```

pub mod coordinator;
pub mod entity;
pub mod error;
pub mod event;
pub mod protocol;
pub mod types;

pub use coordinator::{CoordinatorConfig, DeskCoordinator, Snapshot};
pub use entity::{DeskLight, DeskSensor, DeviceInfo, LightState, TurnOn};
pub use error::{Error, ParseError, ProtocolError, Result, UpdateFailed, ValueError};
pub use event::{DeskEvent, EventBus};
#[cfg(feature = "http")]
pub use protocol::{HttpConfig, HttpDesk};
pub use protocol::{Backlight, BacklightState, Desk, Legs, System};
pub use types::{BacklightMode, ColorMode, Effect, EffectTable, HsColor, MiredsRange, RgbColor};
