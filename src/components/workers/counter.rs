// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::bus::Control;
use crate::components::registry::WorkerRegistry;
use crate::context::Context;
use crate::errors::{ComponentError, DispatchError};
use crate::orchestrator::Hub;
use crate::traits::{ComponentConfig, ComponentInfo, Worker};

pub const KIND: &str = "counter";

/// Writes an incrementing per-instance counter into `ctx[field]`.
pub struct CounterWorker {
    field: String,
    count: AtomicU64,
}

impl CounterWorker {
    pub fn new() -> Self {
        Self {
            field: "counter".to_string(),
            count: AtomicU64::new(0),
        }
    }
}

impl Default for CounterWorker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Worker for CounterWorker {
    fn info(&self) -> ComponentInfo {
        ComponentInfo {
            name: KIND,
            version: "1.0.0",
            description: "sets ctx[field] from an incrementing counter",
        }
    }

    async fn init(&mut self, config: ComponentConfig) -> Result<(), ComponentError> {
        self.field = config.str_field("field")?.to_string();
        self.count.store(0, Ordering::SeqCst);
        Ok(())
    }

    async fn run(&self, _hub: &Arc<Hub>, ctx: &mut Context) -> Result<Control, DispatchError> {
        let n = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        ctx.set(&self.field, Value::from(n));
        Ok(Control::Continue)
    }

    async fn deinit(&self) -> Result<(), ComponentError> {
        self.count.store(0, Ordering::SeqCst);
        Ok(())
    }
}

pub fn register(registry: &mut WorkerRegistry) {
    registry.register(KIND, || Box::new(CounterWorker::new()));
}
