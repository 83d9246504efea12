// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP implementation of the desk handle.
//!
//! Each sub-API lives under its own path prefix (`/api/backlight`,
//! `/api/system`, `/api/legs`). Reads are `GET` requests returning JSON,
//! writes are `PUT` requests with a JSON body, and the pending message
//! buffer is cleared with `DELETE <prefix>/message`.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::{Error, ParseError, ProtocolError};
use crate::protocol::{Backlight, BacklightState, Desk, Legs, RawBacklightState, System};
use crate::types::{Effect, RgbColor};

// ============================================================================
// HttpConfig
// ============================================================================

/// Configuration for a desk reachable over HTTP.
///
/// # Examples
///
/// ```
/// use myrtdesk_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.60")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "http://192.168.1.60:8080");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    use_https: bool,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new HTTP configuration for the specified host.
    ///
    /// A `host:port` pair is accepted and sets the port.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        let (host, port) = match host.rsplit_once(':') {
            Some((name, port)) if !name.contains(':') => match port.parse() {
                Ok(port) => (name.to_string(), port),
                Err(_) => (host, Self::DEFAULT_PORT),
            },
            _ => (host, Self::DEFAULT_PORT),
        };
        Self {
            host,
            port,
            use_https: false,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    ///
    /// If port hasn't been explicitly set, it will be changed to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is enabled.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix =
            if (self.use_https && self.port == 443) || (!self.use_https && self.port == 80) {
                String::new()
            } else {
                format!(":{}", self.port)
            };
        format!("{scheme}://{}{port_suffix}", self.host)
    }

    /// Creates an [`HttpDesk`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be created.
    pub fn into_desk(self) -> Result<HttpDesk, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        let transport = Transport {
            base_url: self.base_url(),
            client,
            timeout: self.timeout,
        };

        Ok(HttpDesk {
            backlight: HttpBacklight(transport.clone()),
            system: HttpSystem(transport.clone()),
            legs: HttpLegs(transport),
        })
    }
}

// ============================================================================
// Transport
// ============================================================================

#[derive(Debug, Clone)]
struct Transport {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl Transport {
    fn url(&self, path: &str) -> String {
        format!("{}/api/{path}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ProtocolError> {
        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                ProtocolError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
            } else {
                ProtocolError::Http(err)
            }
        })?;

        if !response.status().is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        Ok(response)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        tracing::debug!(url = %url, "Reading desk state");

        let response = self.send(self.client.get(&url)).await?;
        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(body = %body, "Received desk state");

        serde_json::from_str(&body).map_err(|err| Error::Parse(ParseError::Json(err)))
    }

    async fn put(&self, path: &str, body: serde_json::Value) -> Result<(), ProtocolError> {
        let url = self.url(path);
        tracing::debug!(url = %url, body = %body, "Writing desk state");

        self.send(self.client.request(Method::PUT, &url).json(&body))
            .await
            .map(drop)
    }

    async fn clear_message(&self, prefix: &str) -> Result<(), ProtocolError> {
        let url = self.url(&format!("{prefix}/message"));
        self.send(self.client.delete(&url)).await.map(drop)
    }
}

// ============================================================================
// Sub-APIs
// ============================================================================

/// A desk reachable over HTTP.
///
/// # Examples
///
/// ```no_run
/// use myrtdesk_lib::protocol::{Backlight, Desk, HttpConfig};
///
/// # async fn example() -> myrtdesk_lib::Result<()> {
/// let desk = HttpConfig::new("192.168.1.60").into_desk()?;
/// let state = desk.backlight().read_state().await?;
/// println!("backlight on: {}", state.enabled);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpDesk {
    backlight: HttpBacklight,
    system: HttpSystem,
    legs: HttpLegs,
}

impl HttpDesk {
    /// Returns the base URL of the desk.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.legs.0.base_url
    }
}

impl Desk for HttpDesk {
    type Backlight = HttpBacklight;
    type System = HttpSystem;
    type Legs = HttpLegs;

    fn backlight(&self) -> &HttpBacklight {
        &self.backlight
    }

    fn system(&self) -> &HttpSystem {
        &self.system
    }

    fn legs(&self) -> &HttpLegs {
        &self.legs
    }
}

/// Backlight sub-API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBacklight(Transport);

impl Backlight for HttpBacklight {
    async fn read_state(&self) -> Result<BacklightState, Error> {
        let raw: RawBacklightState = self.0.get("backlight").await?;
        Ok(BacklightState::try_from(raw)?)
    }

    async fn set_power(&self, enabled: bool) -> Result<(), ProtocolError> {
        self.0
            .put("backlight/power", json!({ "enabled": enabled }))
            .await
    }

    async fn set_brightness(&self, brightness: u8) -> Result<(), ProtocolError> {
        self.0
            .put("backlight/brightness", json!({ "brightness": brightness }))
            .await
    }

    async fn set_color(&self, color: RgbColor) -> Result<(), ProtocolError> {
        self.0
            .put("backlight/color", json!({ "color": color.to_array() }))
            .await
    }

    async fn set_white(&self, warmness: u8) -> Result<(), ProtocolError> {
        self.0
            .put("backlight/white", json!({ "warmness": warmness }))
            .await
    }

    async fn set_effect(&self, effect: Effect) -> Result<(), ProtocolError> {
        self.0
            .put("backlight/effect", json!({ "effect": effect.ordinal() }))
            .await
    }

    async fn clear_message(&self) -> Result<(), ProtocolError> {
        self.0.clear_message("backlight").await
    }
}

#[derive(Deserialize)]
struct HeapReading {
    heap: u32,
}

/// System sub-API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSystem(Transport);

impl System for HttpSystem {
    async fn read_heap(&self) -> Result<u32, Error> {
        let reading: HeapReading = self.0.get("system/heap").await?;
        Ok(reading.heap)
    }

    async fn clear_message(&self) -> Result<(), ProtocolError> {
        self.0.clear_message("system").await
    }
}

#[derive(Deserialize)]
struct HeightReading {
    height: u16,
}

/// Legs sub-API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpLegs(Transport);

impl Legs for HttpLegs {
    async fn get_height(&self) -> Result<u16, Error> {
        let reading: HeightReading = self.0.get("legs/height").await?;
        Ok(reading.height)
    }

    async fn clear_message(&self) -> Result<(), ProtocolError> {
        self.0.clear_message("legs").await
    }
}
