// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;

use crate::bus::Control;
use crate::components::registry::WorkerRegistry;
use crate::context::Context;
use crate::errors::{ComponentError, DispatchError};
use crate::orchestrator::Hub;
use crate::traits::{ComponentConfig, ComponentInfo, Worker};

pub const KIND: &str = "log";

/// Logs the current context. The write goes through `tracing`, so where it
/// lands is the subscriber's business.
pub struct LogWorker {
    id: String,
}

impl LogWorker {
    pub fn new() -> Self {
        Self { id: String::new() }
    }
}

impl Default for LogWorker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Worker for LogWorker {
    fn info(&self) -> ComponentInfo {
        ComponentInfo {
            name: KIND,
            version: "1.0.0",
            description: "logs the context",
        }
    }

    async fn init(&mut self, config: ComponentConfig) -> Result<(), ComponentError> {
        self.id = config.id().to_string();
        Ok(())
    }

    async fn run(&self, _hub: &Arc<Hub>, ctx: &mut Context) -> Result<Control, DispatchError> {
        tracing::info!(worker_id = %self.id, context = %ctx, "context");
        Ok(Control::Continue)
    }
}

pub fn register(registry: &mut WorkerRegistry) {
    registry.register(KIND, || Box::new(LogWorker::new()));
}
