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

pub const KIND: &str = "copy";

/// Copies `ctx[source]` to `ctx[dest]`. A missing source copies null.
pub struct CopyWorker {
    source: String,
    dest: String,
}

impl CopyWorker {
    pub fn new() -> Self {
        Self {
            source: "input".to_string(),
            dest: "output".to_string(),
        }
    }
}

impl Default for CopyWorker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Worker for CopyWorker {
    fn info(&self) -> ComponentInfo {
        ComponentInfo {
            name: KIND,
            version: "1.0.0",
            description: "copies ctx[source] to ctx[dest]",
        }
    }

    async fn init(&mut self, config: ComponentConfig) -> Result<(), ComponentError> {
        self.source = config.str_field("source")?.to_string();
        self.dest = config.str_field("dest")?.to_string();
        Ok(())
    }

    async fn run(&self, _hub: &Arc<Hub>, ctx: &mut Context) -> Result<Control, DispatchError> {
        let value = ctx.get(&self.source).cloned().unwrap_or(Value::Null);
        ctx.set(&self.dest, value);
        Ok(Control::Continue)
    }
}

pub fn register(registry: &mut WorkerRegistry) {
    registry.register(KIND, || Box::new(CopyWorker::new()));
}
