// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while loading or holding configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration has been loaded yet.
    #[error("no configuration has been loaded")]
    NoConfig,

    /// The config file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config document could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Cross-reference validation failed.
    #[error("configuration validation failed: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Invalid(Vec<ValidationError>),
}

/// Errors that can occur during config cross-reference validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A flow lists a worker id that no worker entry declares.
    #[error("flow '{flow_id}' lists worker '{worker_id}' which is not declared")]
    UnknownWorkerInFlow { flow_id: String, worker_id: String },

    /// A service event triggers a flow id that no flow entry declares.
    #[error("service '{service_id}' event '{event}' references flow '{flow_id}' which is not declared")]
    UnknownFlowInEvent {
        service_id: String,
        event: String,
        flow_id: String,
    },
}
