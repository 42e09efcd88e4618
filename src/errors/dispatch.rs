// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised by the registries, the event bus and event dispatch.

use super::ComponentError;
use thiserror::Error;

/// Errors from the kind-name → constructor registries.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Nothing is registered under the requested kind name.
    #[error("unknown {collection} kind '{kind}'")]
    UnknownKind {
        collection: &'static str,
        kind: String,
    },
}

/// Errors from event bus bookkeeping (not from listener execution).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BusError {
    /// No listener list exists for this event name.
    #[error("unknown event '{event}'")]
    UnknownEvent { event: String },

    /// The handle does not name a live subscription for this event.
    #[error("unknown subscription {index} for event '{event}'")]
    UnknownSubscription { event: String, index: usize },
}

/// Errors propagated out of a publish/run chain.
///
/// These fail the whole chain: the bus performs no isolation between
/// listeners, so the first failing listener aborts the rest of that
/// publish call.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("service '{id}' not found")]
    ServiceNotFound { id: String },

    #[error("worker '{id}' not found")]
    WorkerNotFound { id: String },

    #[error("flow '{id}' not found")]
    FlowNotFound { id: String },

    /// A worker's `run` failed for a worker-specific reason.
    #[error("worker '{id}' failed: {reason}")]
    WorkerFailed { id: String, reason: String },

    #[error(transparent)]
    Component(#[from] ComponentError),
}
