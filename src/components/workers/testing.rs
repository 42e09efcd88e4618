// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Test doubles shared by the flow-worker tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::bus::{Control, EventBus};
use crate::cache::MemoryCache;
use crate::context::Context;
use crate::errors::{ComponentError, DispatchError};
use crate::orchestrator::Hub;
use crate::traits::{ComponentConfig, ComponentInfo, Worker};

/// A hub with the given flow table and worker map, nothing else.
pub(crate) fn test_hub(
    flows: &[(&str, &[&str])],
    workers: Vec<(&str, Arc<dyn Worker>)>,
) -> Arc<Hub> {
    let flows: BTreeMap<String, Vec<String>> = flows
        .iter()
        .map(|(id, worker_ids)| {
            (
                id.to_string(),
                worker_ids.iter().map(|w| w.to_string()).collect(),
            )
        })
        .collect();
    let workers: BTreeMap<String, Arc<dyn Worker>> = workers
        .into_iter()
        .map(|(id, worker)| (id.to_string(), worker))
        .collect();
    Arc::new(Hub::new(
        EventBus::new(),
        flows,
        BTreeMap::new(),
        workers,
        MemoryCache::new(),
    ))
}

struct FnWorker<F>(F);

#[async_trait]
impl<F> Worker for FnWorker<F>
where
    F: Fn(&mut Context) -> Result<Control, DispatchError> + Send + Sync,
{
    fn info(&self) -> ComponentInfo {
        ComponentInfo {
            name: "fn",
            version: "0.0.0",
            description: "test double",
        }
    }

    async fn init(&mut self, _config: ComponentConfig) -> Result<(), ComponentError> {
        Ok(())
    }

    async fn run(&self, _hub: &Arc<Hub>, ctx: &mut Context) -> Result<Control, DispatchError> {
        (self.0)(ctx)
    }
}

/// A worker that sets `key` to `value` on every run.
pub(crate) fn setting(key: &str, value: Value) -> Arc<dyn Worker> {
    let key = key.to_string();
    Arc::new(FnWorker(move |ctx: &mut Context| {
        ctx.set(key.clone(), value.clone());
        Ok(Control::Continue)
    }))
}

/// A worker that records whether `key` was present each time it runs.
pub(crate) fn observing(key: &str) -> (Arc<Mutex<Vec<bool>>>, Arc<dyn Worker>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let key = key.to_string();
    let record = Arc::clone(&seen);
    let worker = Arc::new(FnWorker(move |ctx: &mut Context| {
        record.lock().unwrap().push(ctx.contains(&key));
        Ok(Control::Continue)
    }));
    (seen, worker)
}

/// A worker that always vetoes the rest of the chain.
pub(crate) fn halting() -> Arc<dyn Worker> {
    Arc::new(FnWorker(|_ctx: &mut Context| Ok(Control::Halt)))
}

/// A worker that always fails.
pub(crate) fn failing(id: &str) -> Arc<dyn Worker> {
    let id = id.to_string();
    Arc::new(FnWorker(move |_ctx: &mut Context| {
        Err(DispatchError::WorkerFailed {
            id: id.clone(),
            reason: "boom".to_string(),
        })
    }))
}

/// A worker that mutates the context it is given and signals completion on a
/// channel, so fire-and-forget tests can join without sleeping.
pub(crate) fn signaling(
    key: &str,
    value: Value,
) -> (tokio::sync::mpsc::UnboundedReceiver<()>, Arc<dyn Worker>) {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let key = key.to_string();
    let worker = Arc::new(FnWorker(move |ctx: &mut Context| {
        ctx.set(key.clone(), value.clone());
        let _ = tx.send(());
        Ok(Control::Continue)
    }));
    (rx, worker)
}
