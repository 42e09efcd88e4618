// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{ConfigError, FailurePolicy};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The whole configuration document for one orchestrator.
///
/// Services, workers and flows are maps keyed by component id. Keying by id
/// makes duplicate ids a parse-level problem instead of a silent overwrite,
/// and the ordered map gives start/stop passes their deterministic id order.
///
/// # Example
/// ```yaml
/// services:
///   s1:
///     kind: timer
///     config:
///       every_seconds: 1
///     events:
///       timer_tick: [f1]
/// workers:
///   w1:
///     kind: counter
///     config:
///       field: count
/// flows:
///   f1: [w1]
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    #[serde(default)]
    pub services: BTreeMap<String, ServiceEntry>,
    #[serde(default)]
    pub workers: BTreeMap<String, WorkerEntry>,
    /// Flow id → ordered list of worker ids. A flow is pure configuration,
    /// resolved to worker instances on demand.
    #[serde(default)]
    pub flows: BTreeMap<String, Vec<String>>,
}

/// One configured service: its kind, its own config object, and the mapping
/// from event name to the flows that event triggers.
#[derive(Debug, Deserialize)]
pub struct ServiceEntry {
    pub kind: String,
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default)]
    pub events: BTreeMap<String, Vec<String>>,
}

/// One configured worker: its kind and its own config object.
#[derive(Debug, Deserialize)]
pub struct WorkerEntry {
    pub kind: String,
    #[serde(default)]
    pub config: Map<String, Value>,
}

/// Load a config from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.as_ref().display().to_string(),
        source,
    })?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Load a config from a YAML file and cross-check its references.
///
/// Validation ensures every flow lists declared workers and every service
/// event triggers declared flows, so reference errors surface at load time
/// instead of halfway through event wiring.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    super::validate_references(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}
