// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::bus::Control;
use crate::components::registry::WorkerRegistry;
use crate::context::Context;
use crate::errors::{ComponentError, DispatchError};
use crate::orchestrator::Hub;
use crate::traits::{ComponentConfig, ComponentInfo, Worker};

pub const KIND: &str = "ident";

/// Writes a fresh UUID under `ctx["id"]`.
pub struct IdentWorker;

impl IdentWorker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Worker for IdentWorker {
    fn info(&self) -> ComponentInfo {
        ComponentInfo {
            name: KIND,
            version: "1.0.0",
            description: "sets ctx.id to a new UUID",
        }
    }

    async fn init(&mut self, _config: ComponentConfig) -> Result<(), ComponentError> {
        Ok(())
    }

    async fn run(&self, _hub: &Arc<Hub>, ctx: &mut Context) -> Result<Control, DispatchError> {
        ctx.set("id", Value::String(Uuid::new_v4().to_string()));
        Ok(Control::Continue)
    }
}

pub fn register(registry: &mut WorkerRegistry) {
    registry.register(KIND, || Box::new(IdentWorker::new()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn each_run_gets_a_distinct_id() {
        let worker = IdentWorker::new();
        let hub = Arc::new(Hub::for_tests());

        let mut first = Context::new();
        let mut second = Context::new();
        worker.run(&hub, &mut first).await.unwrap();
        worker.run(&hub, &mut second).await.unwrap();

        let a = first.get("id").and_then(Value::as_str).unwrap();
        let b = second.get("id").and_then(Value::as_str).unwrap();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a).is_ok());
    }
}
