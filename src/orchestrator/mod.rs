// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Orchestrator: lifecycle, wiring, and the shared runtime surface.
//!
//! The orchestrator owns the configuration, builds every configured component
//! through the registries, wires bus subscriptions from configuration, and
//! drives the component lifecycle (construct → init → start → stop → deinit).
//!
//! Everything components need at runtime lives on the [`Hub`]: the bus, the
//! flow table, the live component maps and the cache. The hub is assembled
//! once at the end of `init` and immutable afterwards, so steady-state
//! publish traffic only ever reads it.

use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::Instrument;

use crate::bus::{Control, EventBus, EventListener, Sender};
use crate::cache::MemoryCache;
use crate::components::{self, ServiceRegistry, WorkerRegistry};
use crate::config::Config;
use crate::context::Context;
use crate::errors::{ConfigError, DispatchError, FailurePolicy, OrchestratorError};
use crate::observability::messages::component::WorkerInvoked;
use crate::observability::messages::orchestrator::{
    ComponentsInitialized, EventWired, ServicePhaseCompleted, ServicePhaseFailed,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{ComponentConfig, Service, Worker};


/// The runtime surface shared by every live component.
///
/// Services keep a clone of the `Arc` for their spawned triggers; workers
/// receive it per `run` call. After `init` completes the hub is never
/// mutated, which is what lets concurrent publish chains read it freely.
pub struct Hub {
    bus: EventBus,
    flows: BTreeMap<String, Vec<String>>,
    services: BTreeMap<String, Arc<dyn Service>>,
    workers: BTreeMap<String, Arc<dyn Worker>>,
    cache: MemoryCache,
}

impl Hub {
    pub(crate) fn new(
        bus: EventBus,
        flows: BTreeMap<String, Vec<String>>,
        services: BTreeMap<String, Arc<dyn Service>>,
        workers: BTreeMap<String, Arc<dyn Worker>>,
        cache: MemoryCache,
    ) -> Self {
        Self {
            bus,
            flows,
            services,
            workers,
            cache,
        }
    }

    /// An empty hub for unit tests that only need a dispatch surface.
    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self::new(
            EventBus::new(),
            BTreeMap::new(),
            BTreeMap::new(),
            BTreeMap::new(),
            MemoryCache::new(),
        )
    }

    /// Publish an event to the bus, passing this hub through to listeners.
    pub async fn publish(
        self: &Arc<Self>,
        event: &str,
        ctx: &mut Context,
        sender: &Sender,
    ) -> Result<(), DispatchError> {
        self.bus.publish(self, event, ctx, sender).await
    }

    pub fn service(&self, id: &str) -> Result<Arc<dyn Service>, DispatchError> {
        self.services
            .get(id)
            .cloned()
            .ok_or_else(|| DispatchError::ServiceNotFound { id: id.to_string() })
    }

    pub fn worker(&self, id: &str) -> Result<Arc<dyn Worker>, DispatchError> {
        self.workers
            .get(id)
            .cloned()
            .ok_or_else(|| DispatchError::WorkerNotFound { id: id.to_string() })
    }

    /// Live service ids, in id order.
    pub fn service_ids(&self) -> Vec<&str> {
        self.services.keys().map(String::as_str).collect()
    }

    /// Live worker ids, in id order.
    pub fn worker_ids(&self) -> Vec<&str> {
        self.workers.keys().map(String::as_str).collect()
    }

    /// The configured worker-id list of a flow.
    pub fn flow(&self, id: &str) -> Result<&[String], DispatchError> {
        self.flows
            .get(id)
            .map(Vec::as_slice)
            .ok_or_else(|| DispatchError::FlowNotFound { id: id.to_string() })
    }

    /// Resolve a flow to its worker instances, in declared order.
    pub fn flow_workers(&self, id: &str) -> Result<Vec<Arc<dyn Worker>>, DispatchError> {
        self.flow(id)?
            .iter()
            .map(|worker_id| self.worker(worker_id))
            .collect()
    }

    pub fn cache(&self) -> &MemoryCache {
        &self.cache
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }
}

/// A wired subscription: one worker behind a sender-id filter.
///
/// The filter is the declaring service's own id compiled as a
/// case-insensitive regex, so an event is normally only handled by flows
/// declared by the very service that sent it — the bus itself has no notion
/// of sender scoping.
struct FlowListener {
    worker_id: String,
    worker: Arc<dyn Worker>,
    sender_filter: Regex,
}

#[async_trait::async_trait]
impl EventListener for FlowListener {
    async fn on_event(
        &self,
        hub: &Arc<Hub>,
        event: &str,
        ctx: &mut Context,
        sender: &Sender,
    ) -> Result<Control, DispatchError> {
        if !self.sender_filter.is_match(&sender.id) {
            return Ok(Control::Continue);
        }
        let msg = WorkerInvoked {
            worker_id: &self.worker_id,
            event,
        };
        msg.log();
        let span = msg.span("flow_dispatch");
        self.worker.run(hub, ctx).instrument(span).await
    }
}

enum Phase {
    Start,
    Stop,
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Stop => "stop",
        }
    }
}

/// Owns configuration and the live runtime, and drives the lifecycle.
///
/// States are carried implicitly: no config and no hub is *unconfigured*,
/// config without hub is *configured*, config with hub is *initialized* (and
/// running once `start` returns), neither after `deinit`.
pub struct Orchestrator {
    config: Option<Config>,
    hub: Option<Arc<Hub>>,
    service_registry: ServiceRegistry,
    worker_registry: WorkerRegistry,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator {
    /// An orchestrator with every built-in component kind registered.
    pub fn new() -> Self {
        let mut service_registry = ServiceRegistry::new("service");
        components::register_builtin_services(&mut service_registry);
        let mut worker_registry = WorkerRegistry::new("worker");
        components::register_builtin_workers(&mut worker_registry);
        Self {
            config: None,
            hub: None,
            service_registry,
            worker_registry,
        }
    }

    /// Register a custom service kind, overwriting a built-in of the same
    /// name. Must happen before `init`.
    pub fn register_service_kind<F>(&mut self, kind: &str, maker: F)
    where
        F: Fn() -> Box<dyn Service> + Send + Sync + 'static,
    {
        self.service_registry.register(kind, maker);
    }

    /// Register a custom worker kind, overwriting a built-in of the same
    /// name. Must happen before `init`.
    pub fn register_worker_kind<F>(&mut self, kind: &str, maker: F)
    where
        F: Fn() -> Box<dyn Worker> + Send + Sync + 'static,
    {
        self.worker_registry.register(kind, maker);
    }

    /// Load and validate configuration from a YAML file.
    pub fn load_config<P: AsRef<std::path::Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        self.config = Some(crate::config::load_and_validate_config(path)?);
        Ok(())
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_config_str(&mut self, yaml: &str) -> Result<(), ConfigError> {
        let cfg: Config = serde_yaml::from_str(yaml)?;
        crate::config::validate_references(&cfg).map_err(ConfigError::Invalid)?;
        self.config = Some(cfg);
        Ok(())
    }

    pub fn config(&self) -> Result<&Config, ConfigError> {
        self.config.as_ref().ok_or(ConfigError::NoConfig)
    }

    /// Build and wire everything configured.
    ///
    /// Constructs every service and worker through its registry, initializes
    /// them (services first, then workers), then wires one bus subscription
    /// per (service, event, flow, worker) from configuration. Any failure
    /// aborts initialization; there is no rollback, and the orchestrator
    /// stays uninitialized — call [`deinit`](Self::deinit) to release the
    /// config and start over.
    pub async fn init(&mut self) -> Result<(), OrchestratorError> {
        let cfg = self.config.as_ref().ok_or(ConfigError::NoConfig)?;

        // Construct all instances first, then run every init, so a kind
        // lookup failure surfaces before any component side effects.
        let mut services: BTreeMap<String, Box<dyn Service>> = BTreeMap::new();
        for (id, entry) in &cfg.services {
            services.insert(id.clone(), self.service_registry.make(&entry.kind)?);
        }
        let mut workers: BTreeMap<String, Box<dyn Worker>> = BTreeMap::new();
        for (id, entry) in &cfg.workers {
            workers.insert(id.clone(), self.worker_registry.make(&entry.kind)?);
        }

        for (id, service) in services.iter_mut() {
            let entry = &cfg.services[id];
            let config = ComponentConfig::new(id.clone(), entry.config.clone());
            service.init(config).await?;
        }
        for (id, worker) in workers.iter_mut() {
            let entry = &cfg.workers[id];
            let config = ComponentConfig::new(id.clone(), entry.config.clone());
            worker.init(config).await?;
        }

        let services: BTreeMap<String, Arc<dyn Service>> = services
            .into_iter()
            .map(|(id, service)| (id, Arc::from(service)))
            .collect();
        let workers: BTreeMap<String, Arc<dyn Worker>> = workers
            .into_iter()
            .map(|(id, worker)| (id, Arc::from(worker)))
            .collect();

        let mut bus = EventBus::new();
        let mut subscription_count = 0;
        for (service_id, entry) in &cfg.services {
            let sender_filter = RegexBuilder::new(service_id)
                .case_insensitive(true)
                .build()
                .map_err(|source| OrchestratorError::InvalidSenderFilter {
                    pattern: service_id.clone(),
                    source,
                })?;
            for (event, flow_ids) in &entry.events {
                for flow_id in flow_ids {
                    let worker_ids =
                        cfg.flows
                            .get(flow_id)
                            .ok_or_else(|| DispatchError::FlowNotFound {
                                id: flow_id.clone(),
                            })?;
                    for worker_id in worker_ids {
                        let worker = workers.get(worker_id).cloned().ok_or_else(|| {
                            DispatchError::WorkerNotFound {
                                id: worker_id.clone(),
                            }
                        })?;
                        EventWired {
                            event,
                            service_id,
                            flow_id,
                            worker_id,
                        }
                        .log();
                        bus.subscribe(
                            event,
                            Arc::new(FlowListener {
                                worker_id: worker_id.clone(),
                                worker,
                                sender_filter: sender_filter.clone(),
                            }),
                        );
                        subscription_count += 1;
                    }
                }
            }
        }

        ComponentsInitialized {
            service_count: services.len(),
            worker_count: workers.len(),
            subscription_count,
        }
        .log();

        self.hub = Some(Arc::new(Hub::new(
            bus,
            cfg.flows.clone(),
            services,
            workers,
            MemoryCache::new(),
        )));
        Ok(())
    }

    /// Start every service, in id order.
    pub async fn start(&self) -> Result<(), OrchestratorError> {
        self.service_pass(Phase::Start).await
    }

    /// Stop every service, in id order. Running flow executions already
    /// dispatched are not cancelled.
    pub async fn stop(&self) -> Result<(), OrchestratorError> {
        self.service_pass(Phase::Stop).await
    }

    async fn service_pass(&self, phase: Phase) -> Result<(), OrchestratorError> {
        let hub = self.hub()?;
        let policy = self
            .config
            .as_ref()
            .map(|cfg| cfg.failure_policy)
            .unwrap_or_default();

        let mut first_failure = None;
        for (id, service) in &hub.services {
            let result = match phase {
                Phase::Start => service.start(hub).await,
                Phase::Stop => service.stop().await,
            };
            match result {
                Ok(()) => ServicePhaseCompleted {
                    service_id: id,
                    phase: phase.name(),
                }
                .log(),
                Err(error) => {
                    ServicePhaseFailed {
                        service_id: id,
                        phase: phase.name(),
                        error: &error,
                    }
                    .log();
                    let failure = OrchestratorError::ServicePhase {
                        id: id.clone(),
                        phase: phase.name(),
                        source: error,
                    };
                    match policy {
                        FailurePolicy::FailFast => return Err(failure),
                        FailurePolicy::BestEffort => {
                            first_failure.get_or_insert(failure);
                        }
                    }
                }
            }
        }
        match first_failure {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    /// Tear everything down: deinit every service and worker, release the
    /// live maps, bus, cache and config. A second call fails with NoConfig.
    pub async fn deinit(&mut self) -> Result<(), OrchestratorError> {
        match (self.hub.take(), self.config.take()) {
            (Some(hub), _) => {
                for service in hub.services.values() {
                    service.deinit().await?;
                }
                for worker in hub.workers.values() {
                    worker.deinit().await?;
                }
                hub.cache.clear();
                Ok(())
            }
            // Loaded but never (successfully) initialized: just release the
            // config, as after a failed init.
            (None, Some(_)) => Ok(()),
            (None, None) => Err(ConfigError::NoConfig.into()),
        }
    }

    /// The live runtime surface, once `init` has completed.
    pub fn hub(&self) -> Result<&Arc<Hub>, OrchestratorError> {
        self.hub.as_ref().ok_or(OrchestratorError::NotInitialized)
    }

    pub fn service(&self, id: &str) -> Result<Arc<dyn Service>, OrchestratorError> {
        Ok(self.hub()?.service(id)?)
    }

    pub fn worker(&self, id: &str) -> Result<Arc<dyn Worker>, OrchestratorError> {
        Ok(self.hub()?.worker(id)?)
    }

    pub fn flow_workers(&self, id: &str) -> Result<Vec<Arc<dyn Worker>>, OrchestratorError> {
        Ok(self.hub()?.flow_workers(id)?)
    }
}
