// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for event publication and listener chain events.

use super::StructuredLog;
use std::fmt::{Display, Formatter};

/// An event entered its listener chain.
///
/// # Log Level
/// `debug!` - high-frequency dispatch event
pub struct EventPublished<'a> {
    pub event: &'a str,
    pub sender_id: &'a str,
    pub listener_count: usize,
}

impl Display for EventPublished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Event '{}' published by '{}': {} listener(s)",
            self.event, self.sender_id, self.listener_count
        )
    }
}

impl StructuredLog for EventPublished<'_> {
    fn log(&self) {
        tracing::debug!(
            event = self.event,
            sender_id = self.sender_id,
            listener_count = self.listener_count,
            "{}",
            self
        );
    }
}

/// A listener vetoed the rest of its chain.
///
/// # Log Level
/// `debug!` - expected control flow, not a failure
pub struct EventHalted<'a> {
    pub event: &'a str,
    /// Position of the halting listener in subscription order.
    pub position: usize,
}

impl Display for EventHalted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Event '{}' halted by listener at position {}",
            self.event, self.position
        )
    }
}

impl StructuredLog for EventHalted<'_> {
    fn log(&self) {
        tracing::debug!(event = self.event, position = self.position, "{}", self);
    }
}
