// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Periodic tick source.
//!
//! Every `every_seconds` the timer publishes a `timer_tick` event with a
//! fresh context (`input` = current time, `output` = null) and itself as the
//! sender. `stop` cancels the timer's own trigger only; flow executions
//! already dispatched keep running.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::bus::Sender;
use crate::components::registry::ServiceRegistry;
use crate::context::Context;
use crate::errors::{ComponentError, DispatchError};
use crate::orchestrator::Hub;
use crate::traits::{ComponentConfig, ComponentInfo, Service};

pub const KIND: &str = "timer";

/// Event name published on every tick.
pub const TICK_EVENT: &str = "timer_tick";

pub struct Timer {
    id: String,
    every: Duration,
    cancel: Mutex<Option<CancellationToken>>,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            id: String::new(),
            every: Duration::ZERO,
            cancel: Mutex::new(None),
        }
    }

    async fn tick(hub: &Arc<Hub>, id: &str) -> Result<(), DispatchError> {
        let mut ctx = Context::new();
        ctx.set("input", json!(chrono::Utc::now().to_rfc3339()));
        ctx.set("output", Value::Null);

        let sender = Sender::new(KIND, id);
        hub.publish(TICK_EVENT, &mut ctx, &sender).await
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Service for Timer {
    fn info(&self) -> ComponentInfo {
        ComponentInfo {
            name: KIND,
            version: "1.0.0",
            description: "publishes timer_tick at a fixed interval",
        }
    }

    async fn init(&mut self, config: ComponentConfig) -> Result<(), ComponentError> {
        let secs = config.u64_field("every_seconds")?;
        if secs == 0 {
            return Err(config.invalid("every_seconds", "must be positive"));
        }
        self.every = Duration::from_secs(secs);
        self.id = config.id().to_string();
        Ok(())
    }

    async fn start(&self, hub: &Arc<Hub>) -> Result<(), ComponentError> {
        let token = CancellationToken::new();
        *self.cancel.lock().await = Some(token.clone());

        let hub = Arc::clone(hub);
        let id = self.id.clone();
        let every = self.every;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.tick().await; // the zeroth tick fires immediately
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        if let Err(error) = Timer::tick(&hub, &id).await {
                            tracing::error!(service_id = %id, %error, "timer tick dispatch failed");
                        }
                    }
                }
            }
        });
        Ok(())
    }

    async fn stop(&self) -> Result<(), ComponentError> {
        if let Some(token) = self.cancel.lock().await.take() {
            token.cancel();
        }
        Ok(())
    }
}

pub fn register(registry: &mut ServiceRegistry) {
    registry.register(KIND, || Box::new(Timer::new()));
}
