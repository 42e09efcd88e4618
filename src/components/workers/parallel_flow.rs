// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Parallel flow worker: fire-and-forget fan-out.
//!
//! `run` makes ONE copy of the context per invocation. Every worker across
//! every configured flow runs against that shared copy, isolated from the
//! caller's context and from other invocations. Dispatch is unsupervised: no
//! join handle is retained, there is no ordering among the spawned tasks and
//! no backpressure, and failures are logged but never propagated. Do not add
//! awaiting here — that would quietly turn the semantics serial.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::bus::Control;
use crate::components::registry::WorkerRegistry;
use crate::context::Context;
use crate::errors::{ComponentError, DispatchError};
use crate::observability::messages::component::FanOutWorkerFailed;
use crate::observability::messages::StructuredLog;
use crate::orchestrator::Hub;
use crate::traits::{ComponentConfig, ComponentInfo, Worker};

pub const KIND: &str = "parallel_flow";

pub struct ParallelFlow {
    flows: Vec<String>,
}

impl ParallelFlow {
    pub fn new() -> Self {
        Self { flows: Vec::new() }
    }
}

impl Default for ParallelFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Worker for ParallelFlow {
    fn info(&self) -> ComponentInfo {
        ComponentInfo {
            name: KIND,
            version: "1.0.0",
            description: "runs the workers of other flows concurrently against one context copy",
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
        // Resolve up front so lookup errors still reach the caller; only the
        // execution itself is unsupervised.
        let mut resolved = Vec::new();
        for flow_id in &self.flows {
            resolved.extend(hub.flow_workers(flow_id)?);
        }

        let copy = Arc::new(Mutex::new(ctx.clone()));
        for worker in resolved {
            let hub = Arc::clone(hub);
            let copy = Arc::clone(&copy);
            tokio::spawn(async move {
                let mut shared = copy.lock().await;
                if let Err(error) = worker.run(&hub, &mut shared).await {
                    FanOutWorkerFailed {
                        worker: worker.info().name,
                        error: &error,
                    }
                    .log();
                }
            });
        }
        Ok(Control::Continue)
    }
}

pub fn register(registry: &mut WorkerRegistry) {
    registry.register(KIND, || Box::new(ParallelFlow::new()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::workers::testing::{failing, signaling, test_hub};
    use serde_json::json;
    use std::time::Duration;

    async fn parallel(flows: &[&str]) -> ParallelFlow {
        let mut worker = ParallelFlow::new();
        worker
            .init(ComponentConfig::from_json("pf", json!({ "flows": flows })))
            .await
            .unwrap();
        worker
    }

    async fn joined(rx: &mut tokio::sync::mpsc::UnboundedReceiver<()>) {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("fan-out worker did not run")
            .expect("fan-out channel closed");
    }

    #[tokio::test]
    async fn init_rejects_an_empty_flow_list() {
        let mut worker = ParallelFlow::new();
        let err = worker
            .init(ComponentConfig::from_json("pf", json!({ "flows": [] })))
            .await
            .unwrap_err();
        assert!(matches!(err, ComponentError::InvalidConfig { .. }));
    }

    #[tokio::test]
    async fn mutations_stay_off_the_original_context() {
        let (mut rx1, w1) = signaling("from_f1", json!(true));
        let (mut rx2, w2) = signaling("from_f2", json!(true));
        let hub = test_hub(
            &[("f1", &["w1"]), ("f2", &["w2"])],
            vec![("w1", w1), ("w2", w2)],
        );

        let worker = parallel(&["f1", "f2"]).await;
        let mut ctx = Context::new();
        ctx.set("original", json!(1));
        worker.run(&hub, &mut ctx).await.unwrap();

        joined(&mut rx1).await;
        joined(&mut rx2).await;

        assert!(!ctx.contains("from_f1"));
        assert!(!ctx.contains("from_f2"));
        assert_eq!(ctx.get("original"), Some(&json!(1)));
    }

    #[tokio::test]
    async fn invocations_do_not_share_their_copies() {
        let (mut rx, w) = signaling("mark", json!(true));
        let (seen, observer) = crate::components::workers::testing::observing("mark");
        let hub = test_hub(
            &[("f1", &["w"]), ("f2", &["observer"])],
            vec![("w", w), ("observer", observer)],
        );

        // First invocation marks its own copy.
        let first = parallel(&["f1"]).await;
        let mut ctx = Context::new();
        first.run(&hub, &mut ctx).await.unwrap();
        joined(&mut rx).await;

        // A second, independent invocation must not see the prior mark.
        let second = parallel(&["f2"]).await;
        second.run(&hub, &mut ctx).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(*seen.lock().unwrap(), vec![false]);
    }

    #[tokio::test]
    async fn workers_of_one_invocation_share_one_copy() {
        let (mut rx1, setter) = signaling("mark", json!(true));
        let (seen, observer) = crate::components::workers::testing::observing("mark");
        // Same invocation, two flows, one shared copy. Task order is not
        // guaranteed, so only assert that both ran against it and the
        // original stayed clean.
        let hub = test_hub(
            &[("f1", &["setter"]), ("f2", &["observer"])],
            vec![("setter", setter), ("observer", observer)],
        );

        let worker = parallel(&["f1", "f2"]).await;
        let mut ctx = Context::new();
        worker.run(&hub, &mut ctx).await.unwrap();
        joined(&mut rx1).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(seen.lock().unwrap().len(), 1);
        assert!(!ctx.contains("mark"));
    }

    #[tokio::test]
    async fn unknown_flow_id_fails_before_any_dispatch() {
        let hub = test_hub(&[], vec![]);
        let worker = parallel(&["ghost"]).await;
        let mut ctx = Context::new();

        assert!(matches!(
            worker.run(&hub, &mut ctx).await,
            Err(DispatchError::FlowNotFound { ref id }) if id == "ghost"
        ));
    }

    #[tokio::test]
    async fn fan_out_failures_do_not_propagate() {
        let hub = test_hub(&[("f1", &["bad"])], vec![("bad", failing("bad"))]);
        let worker = parallel(&["f1"]).await;
        let mut ctx = Context::new();

        // The dispatching run itself succeeds.
        let verdict = worker.run(&hub, &mut ctx).await.unwrap();
        assert_eq!(verdict, Control::Continue);
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
