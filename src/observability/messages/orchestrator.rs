// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for orchestrator lifecycle, wiring, and start/stop passes.

use super::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// All configured components were constructed, initialized and wired.
///
/// # Log Level
/// `info!` - important operational event
pub struct ComponentsInitialized {
    pub service_count: usize,
    pub worker_count: usize,
    pub subscription_count: usize,
}

impl Display for ComponentsInitialized {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Orchestrator initialized: {} service(s), {} worker(s), {} subscription(s)",
            self.service_count, self.worker_count, self.subscription_count
        )
    }
}

impl StructuredLog for ComponentsInitialized {
    fn log(&self) {
        tracing::info!(
            service_count = self.service_count,
            worker_count = self.worker_count,
            subscription_count = self.subscription_count,
            "{}",
            self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "orchestrator",
            span_name = name,
            service_count = self.service_count,
            worker_count = self.worker_count,
        )
    }
}

/// One bus subscription was wired from configuration.
///
/// # Log Level
/// `debug!` - init-time detail
pub struct EventWired<'a> {
    pub event: &'a str,
    pub service_id: &'a str,
    pub flow_id: &'a str,
    pub worker_id: &'a str,
}

impl Display for EventWired<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Wired event '{}': service '{}' -> flow '{}' -> worker '{}'",
            self.event, self.service_id, self.flow_id, self.worker_id
        )
    }
}

impl StructuredLog for EventWired<'_> {
    fn log(&self) {
        tracing::debug!(
            event = self.event,
            service_id = self.service_id,
            flow_id = self.flow_id,
            worker_id = self.worker_id,
            "{}",
            self
        );
    }
}

/// A service completed a lifecycle phase.
///
/// # Log Level
/// `info!` - important operational event
pub struct ServicePhaseCompleted<'a> {
    pub service_id: &'a str,
    pub phase: &'static str,
}

impl Display for ServicePhaseCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Service '{}' completed {}", self.service_id, self.phase)
    }
}

impl StructuredLog for ServicePhaseCompleted<'_> {
    fn log(&self) {
        tracing::info!(service_id = self.service_id, phase = self.phase, "{}", self);
    }
}

/// A service failed a lifecycle phase.
///
/// # Log Level
/// `error!` - failure requiring attention
pub struct ServicePhaseFailed<'a> {
    pub service_id: &'a str,
    pub phase: &'static str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ServicePhaseFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Service '{}' failed to {}: {}",
            self.service_id, self.phase, self.error
        )
    }
}

impl StructuredLog for ServicePhaseFailed<'_> {
    fn log(&self) {
        tracing::error!(
            service_id = self.service_id,
            phase = self.phase,
            error = %self.error,
            "{}",
            self
        );
    }
}
