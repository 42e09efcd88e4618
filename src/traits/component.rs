// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Component contracts for services and workers.
//!
//! A **service** is a long-lived event source: once started it raises domain
//! events (a periodic timer, a network listener) until stopped. A **worker**
//! is a unit of reaction: the orchestrator wires it to event names through
//! flows, and `run` mutates the per-event context.
//!
//! Components never hold a pointer back to their owner. The shared runtime
//! surface ([`Hub`]) is passed into `start`/`run` as a parameter, so there is
//! no back-reference to clear at deinitialization.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::bus::Control;
use crate::context::Context;
use crate::errors::{ComponentError, DispatchError};
use crate::orchestrator::Hub;

/// Static facts a component reports about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

/// The resolved config handed to a component at init: the entry's declared
/// config object merged with the entry's id.
///
/// Accessors return [`ComponentError::InvalidConfig`] when a field is missing
/// or has the wrong shape, so component `init` bodies stay flat.
#[derive(Debug, Clone)]
pub struct ComponentConfig {
    id: String,
    fields: Map<String, Value>,
}

impl ComponentConfig {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        let id = id.into();
        let mut fields = fields;
        fields.insert("id".to_string(), Value::String(id.clone()));
        Self { id, fields }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// A required string field.
    pub fn str_field(&self, field: &str) -> Result<&str, ComponentError> {
        self.get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| self.invalid(field, "expected a string"))
    }

    /// A required non-negative integer field.
    pub fn u64_field(&self, field: &str) -> Result<u64, ComponentError> {
        self.get(field)
            .and_then(Value::as_u64)
            .ok_or_else(|| self.invalid(field, "expected a non-negative integer"))
    }

    /// A required list-of-strings field.
    pub fn str_list(&self, field: &str) -> Result<Vec<String>, ComponentError> {
        let items = self
            .get(field)
            .and_then(Value::as_array)
            .ok_or_else(|| self.invalid(field, "expected a list of strings"))?;
        items
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.invalid(field, "expected a list of strings"))
            })
            .collect()
    }

    pub fn invalid(&self, field: &str, reason: impl Into<String>) -> ComponentError {
        ComponentError::InvalidConfig {
            id: self.id.clone(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
impl ComponentConfig {
    /// Test helper: build a config straight from a `json!` object literal.
    pub(crate) fn from_json(id: &str, fields: Value) -> Self {
        match fields {
            Value::Object(map) => Self::new(id, map),
            other => panic!("component config must be a JSON object, got {other}"),
        }
    }
}

/// A long-lived event source with start/stop semantics.
#[async_trait]
pub trait Service: Send + Sync {
    fn info(&self) -> ComponentInfo;

    /// Validate and absorb the resolved config. Runs once, before wiring.
    async fn init(&mut self, config: ComponentConfig) -> Result<(), ComponentError>;

    /// Begin raising events. The hub is the service's only channel back into
    /// the engine; recurring sources keep a clone for their spawned trigger.
    async fn start(&self, hub: &Arc<Hub>) -> Result<(), ComponentError>;

    /// Halt the service's own recurring trigger. Does not cancel downstream
    /// flow executions already dispatched.
    async fn stop(&self) -> Result<(), ComponentError>;

    async fn deinit(&self) -> Result<(), ComponentError> {
        Ok(())
    }
}

/// A unit of reaction invoked with the per-event context.
#[async_trait]
pub trait Worker: Send + Sync {
    fn info(&self) -> ComponentInfo;

    async fn init(&mut self, config: ComponentConfig) -> Result<(), ComponentError>;

    /// Do the work. Must be callable repeatedly; the framework does not
    /// assume idempotence. Returning [`Control::Halt`] vetoes the remaining
    /// listeners of the current publish call.
    async fn run(&self, hub: &Arc<Hub>, ctx: &mut Context) -> Result<Control, DispatchError>;

    async fn deinit(&self) -> Result<(), ComponentError> {
        Ok(())
    }
}
