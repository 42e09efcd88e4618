// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Serial flow worker: recursive, sequential fan-out.
//!
//! Configured with a list of flow ids. `run` resolves each flow's worker list
//! through the hub and runs every worker in order, awaited, all sharing the
//! caller's context — later workers observe mutations made by earlier ones,
//! across flow boundaries.

use async_trait::async_trait;
use std::sync::Arc;

use crate::bus::Control;
use crate::components::registry::WorkerRegistry;
use crate::context::Context;
use crate::errors::{ComponentError, DispatchError};
use crate::orchestrator::Hub;
use crate::traits::{ComponentConfig, ComponentInfo, Worker};

pub const KIND: &str = "serial_flow";

pub struct SerialFlow {
    flows: Vec<String>,
}

impl SerialFlow {
    pub fn new() -> Self {
        Self { flows: Vec::new() }
    }
}

impl Default for SerialFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Worker for SerialFlow {
    fn info(&self) -> ComponentInfo {
        ComponentInfo {
            name: KIND,
            version: "1.0.0",
            description: "runs the workers of other flows sequentially, sharing one context",
        }
    }

    async fn init(&mut self, config: ComponentConfig) -> Result<(), ComponentError> {
        let flows = config.str_list("flows")?;
        if flows.is_empty() {
            return Err(config.invalid("flows", "needs at least one flow"));
        }
        self.flows = flows;
        Ok(())
    }

    async fn run(&self, hub: &Arc<Hub>, ctx: &mut Context) -> Result<Control, DispatchError> {
        for flow_id in &self.flows {
            for worker in hub.flow_workers(flow_id)? {
                // A veto stops the rest of the chain at every nesting depth.
                if worker.run(hub, ctx).await? == Control::Halt {
                    return Ok(Control::Halt);
                }
            }
        }
        Ok(Control::Continue)
    }
}

pub fn register(registry: &mut WorkerRegistry) {
    registry.register(KIND, || Box::new(SerialFlow::new()));
}
