// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! JSON encode/decode workers for contexts that cross a text boundary.
//!
//! `json_encode` serializes `ctx["output"]` to a JSON string in place;
//! `json_decode` parses the JSON string in `ctx["input"]` back into a value.
//! Absent fields behave like an empty object.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::bus::Control;
use crate::components::registry::WorkerRegistry;
use crate::context::Context;
use crate::errors::{ComponentError, DispatchError};
use crate::orchestrator::Hub;
use crate::traits::{ComponentConfig, ComponentInfo, Worker};

pub const ENCODE_KIND: &str = "json_encode";
pub const DECODE_KIND: &str = "json_decode";

pub struct JsonEncodeWorker {
    id: String,
}

impl JsonEncodeWorker {
    pub fn new() -> Self {
        Self { id: String::new() }
    }
}

#[async_trait]
impl Worker for JsonEncodeWorker {
    fn info(&self) -> ComponentInfo {
        ComponentInfo {
            name: ENCODE_KIND,
            version: "1.0.0",
            description: "serializes ctx.output to a JSON string",
        }
    }

    async fn init(&mut self, config: ComponentConfig) -> Result<(), ComponentError> {
        self.id = config.id().to_string();
        Ok(())
    }

    async fn run(&self, _hub: &Arc<Hub>, ctx: &mut Context) -> Result<Control, DispatchError> {
        let value = match ctx.get("output") {
            Some(Value::Null) | None => Value::Object(serde_json::Map::new()),
            Some(value) => value.clone(),
        };
        let encoded = serde_json::to_string(&value).map_err(|e| DispatchError::WorkerFailed {
            id: self.id.clone(),
            reason: e.to_string(),
        })?;
        ctx.set("output", Value::String(encoded));
        Ok(Control::Continue)
    }
}

pub struct JsonDecodeWorker {
    id: String,
}

impl JsonDecodeWorker {
    pub fn new() -> Self {
        Self { id: String::new() }
    }
}

#[async_trait]
impl Worker for JsonDecodeWorker {
    fn info(&self) -> ComponentInfo {
        ComponentInfo {
            name: DECODE_KIND,
            version: "1.0.0",
            description: "parses ctx.input from a JSON string",
        }
    }

    async fn init(&mut self, config: ComponentConfig) -> Result<(), ComponentError> {
        self.id = config.id().to_string();
        Ok(())
    }

    async fn run(&self, _hub: &Arc<Hub>, ctx: &mut Context) -> Result<Control, DispatchError> {
        let raw = match ctx.get("input") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "{}".to_string(),
            Some(other) => {
                return Err(DispatchError::WorkerFailed {
                    id: self.id.clone(),
                    reason: format!("ctx.input is not a string: {other}"),
                })
            }
        };
        let decoded: Value =
            serde_json::from_str(&raw).map_err(|e| DispatchError::WorkerFailed {
                id: self.id.clone(),
                reason: e.to_string(),
            })?;
        ctx.set("input", decoded);
        Ok(Control::Continue)
    }
}

pub fn register(registry: &mut WorkerRegistry) {
    registry.register(ENCODE_KIND, || Box::new(JsonEncodeWorker::new()));
    registry.register(DECODE_KIND, || Box::new(JsonDecodeWorker::new()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn inited<W: Worker>(mut worker: W) -> W {
        worker
            .init(ComponentConfig::from_json("w1", json!({})))
            .await
            .unwrap();
        worker
    }

    #[tokio::test]
    async fn encode_serializes_output_in_place() {
        let worker = inited(JsonEncodeWorker::new()).await;
        let hub = Arc::new(Hub::for_tests());
        let mut ctx = Context::new();
        ctx.set("output", json!({ "n": 1 }));

        worker.run(&hub, &mut ctx).await.unwrap();
        assert_eq!(ctx.get("output"), Some(&json!(r#"{"n":1}"#)));
    }

    #[tokio::test]
    async fn encode_treats_absent_output_as_empty_object() {
        let worker = inited(JsonEncodeWorker::new()).await;
        let hub = Arc::new(Hub::for_tests());
        let mut ctx = Context::new();

        worker.run(&hub, &mut ctx).await.unwrap();
        assert_eq!(ctx.get("output"), Some(&json!("{}")));
    }

    #[tokio::test]
    async fn decode_parses_input_in_place() {
        let worker = inited(JsonDecodeWorker::new()).await;
        let hub = Arc::new(Hub::for_tests());
        let mut ctx = Context::new();
        ctx.set("input", json!(r#"{"n":1}"#));

        worker.run(&hub, &mut ctx).await.unwrap();
        assert_eq!(ctx.get("input"), Some(&json!({ "n": 1 })));
    }

    #[tokio::test]
    async fn decode_rejects_bad_json_and_non_strings() {
        let worker = inited(JsonDecodeWorker::new()).await;
        let hub = Arc::new(Hub::for_tests());

        let mut ctx = Context::new();
        ctx.set("input", json!("{not json"));
        assert!(matches!(
            worker.run(&hub, &mut ctx).await,
            Err(DispatchError::WorkerFailed { .. })
        ));

        ctx.set("input", json!(7));
        assert!(matches!(
            worker.run(&hub, &mut ctx).await,
            Err(DispatchError::WorkerFailed { .. })
        ));
    }

    #[tokio::test]
    async fn decode_treats_absent_input_as_empty_object() {
        let worker = inited(JsonDecodeWorker::new()).await;
        let hub = Arc::new(Hub::for_tests());
        let mut ctx = Context::new();

        worker.run(&hub, &mut ctx).await.unwrap();
        assert_eq!(ctx.get("input"), Some(&json!({})));
    }
}
