// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised by component instances themselves.

use thiserror::Error;

/// A component's own config or lifecycle failed its local checks.
#[derive(Debug, Error)]
pub enum ComponentError {
    /// A component's resolved config failed its local validation,
    /// e.g. a missing field or a non-positive timer interval.
    #[error("component '{id}' config field '{field}' is invalid: {reason}")]
    InvalidConfig {
        id: String,
        field: String,
        reason: String,
    },

    /// A lifecycle step (start/stop/deinit) failed.
    #[error("component '{id}' failed: {reason}")]
    Failed { id: String, reason: String },
}
