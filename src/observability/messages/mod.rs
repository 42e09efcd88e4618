// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message is a plain struct implementing `Display` (the human-readable
//! line) and [`StructuredLog`] (the tracing emission with structured fields).
//!
//! # Usage Pattern
//!
//! ```rust
//! use switchboard::observability::messages::bus::EventPublished;
//! use switchboard::observability::messages::StructuredLog;
//!
//! EventPublished {
//!     event: "timer_tick",
//!     sender_id: "s1",
//!     listener_count: 2,
//! }
//! .log();
//! ```

use std::fmt::Display;
use tracing::Span;

pub mod bus;
pub mod component;
pub mod orchestrator;

/// A log message with structured fields.
pub trait StructuredLog: Display {
    /// Emit the message at its natural level with structured fields.
    fn log(&self);

    /// A span carrying the message's identifying fields, for wrapping the
    /// work the message announces.
    fn span(&self, name: &str) -> Span {
        tracing::info_span!("switchboard", span_name = name)
    }
}
