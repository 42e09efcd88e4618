// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in components and the registries they register into.

pub mod registry;
pub mod services;
pub mod workers;

pub use registry::{Registry, ServiceRegistry, WorkerRegistry};

/// Register every built-in service kind.
pub fn register_builtin_services(registry: &mut ServiceRegistry) {
    services::timer::register(registry);
}

/// Register every built-in worker kind.
pub fn register_builtin_workers(registry: &mut WorkerRegistry) {
    workers::copy::register(registry);
    workers::counter::register(registry);
    workers::ident::register(registry);
    workers::json_codec::register(registry);
    workers::log::register(registry);
    workers::parallel_flow::register(registry);
    workers::serial_flow::register(registry);
    workers::stamp::register(registry);
}
