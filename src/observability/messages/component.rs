// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for worker invocation and fan-out events.

use super::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A wired worker is about to run against an event's context.
pub struct WorkerInvoked<'a> {
    pub worker_id: &'a str,
    pub event: &'a str,
}

impl Display for WorkerInvoked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Worker '{}' invoked for event '{}'", self.worker_id, self.event)
    }
}

impl StructuredLog for WorkerInvoked<'_> {
    fn log(&self) {
        tracing::debug!(worker_id = self.worker_id, event = self.event, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "worker",
            span_name = name,
            worker_id = self.worker_id,
            event = self.event,
        )
    }
}

/// A fire-and-forget fan-out task failed.
///
/// Parallel fan-out failures are unobserved by the dispatcher, so this log
/// line is the only trace they leave.
///
/// # Log Level
/// `warn!` - accepted blind spot, still worth surfacing
pub struct FanOutWorkerFailed<'a> {
    pub worker: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for FanOutWorkerFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Fan-out worker '{}' failed: {}",
            self.worker, self.error
        )
    }
}

impl StructuredLog for FanOutWorkerFailed<'_> {
    fn log(&self) {
        tracing::warn!(worker = self.worker, error = %self.error, "{}", self);
    }
}
