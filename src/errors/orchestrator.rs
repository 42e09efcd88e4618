// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::{ComponentError, ConfigError, DispatchError, RegistryError};
use serde::Deserialize;
use thiserror::Error;

/// Errors from orchestrator lifecycle operations.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// A component failed its own init/deinit.
    #[error(transparent)]
    Component(#[from] ComponentError),

    /// `init` has not completed, so there is no live runtime state.
    #[error("orchestrator is not initialized")]
    NotInitialized,

    /// A service id is not a usable sender-id filter pattern.
    #[error("service id '{pattern}' is not a valid sender filter pattern: {source}")]
    InvalidSenderFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A service failed during a start or stop pass.
    #[error("service '{id}' failed to {phase}: {source}")]
    ServicePhase {
        id: String,
        phase: &'static str,
        #[source]
        source: ComponentError,
    },
}

/// How a start/stop pass reacts to a failing service.
///
/// `FailFast` aborts the pass on the first failure. `BestEffort` keeps
/// attempting the remaining services and reports the first failure once
/// the pass is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    #[default]
    FailFast,
    BestEffort,
}
