// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::bus::Control;
use crate::components::registry::WorkerRegistry;
use crate::context::Context;
use crate::errors::{ComponentError, DispatchError};
use crate::orchestrator::Hub;
use crate::traits::{ComponentConfig, ComponentInfo, Worker};

pub const KIND: &str = "stamp";

/// Writes the current time (RFC 3339) into `ctx[field]`.
pub struct StampWorker {
    field: String,
}

impl StampWorker {
    pub fn new() -> Self {
        Self {
            field: "ts".to_string(),
        }
    }
}

impl Default for StampWorker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Worker for StampWorker {
    fn info(&self) -> ComponentInfo {
        ComponentInfo {
            name: KIND,
            version: "1.0.0",
            description: "sets ctx[field] to the current RFC 3339 time",
        }
    }

    async fn init(&mut self, config: ComponentConfig) -> Result<(), ComponentError> {
        let field = config.str_field("field")?.trim().to_string();
        if field.is_empty() {
            return Err(config.invalid("field", "must not be blank"));
        }
        self.field = field;
        Ok(())
    }

    async fn run(&self, _hub: &Arc<Hub>, ctx: &mut Context) -> Result<Control, DispatchError> {
        ctx.set(
            &self.field,
            Value::String(chrono::Utc::now().to_rfc3339()),
        );
        Ok(Control::Continue)
    }
}

pub fn register(registry: &mut WorkerRegistry) {
    registry.register(KIND, || Box::new(StampWorker::new()));
}
