// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `MyrtDesk` library.
//!
//! Failures are split by origin: value validation, protocol communication
//! and response parsing. A failed poll cycle collapses all of them into a
//! single [`UpdateFailed`] that keeps the original cause as its source.

use std::time::Duration;

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during protocol communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A refresh did not finish within its overall deadline.
    #[error("deadline of {} ms exceeded", .0.as_millis())]
    Timeout(Duration),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The effect name is not in the effect list.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    /// The device reported an effect ordinal with no matching effect.
    #[error("unknown effect ordinal: {0}")]
    UnknownEffectOrdinal(u8),

    /// The mireds bounds are empty or inverted.
    #[error("invalid mireds range [{min}, {max}]")]
    InvalidMiredsRange {
        /// Lower bound.
        min: u16,
        /// Upper bound.
        max: u16,
    },
}

/// Errors related to talking to the desk.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// A single request exceeded the client timeout.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing desk responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The response body is not the expected JSON document.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A poll cycle failed as a unit.
///
/// No partial snapshot is produced when this is raised. The previous
/// snapshot stays the last known good value.
#[derive(Debug, Error)]
#[error("error communicating with API: {source}")]
pub struct UpdateFailed {
    #[source]
    source: Error,
}

impl UpdateFailed {
    /// Wraps the error that aborted the refresh.
    #[must_use]
    pub fn new(source: impl Into<Error>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Returns the original cause.
    #[must_use]
    pub fn cause(&self) -> &Error {
        &self.source
    }

    /// Returns `true` if the refresh ran out of time.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self.source, Error::Timeout(_))
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
