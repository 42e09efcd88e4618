// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod bus;          // event dispatch
pub mod cache;        // shared in-memory key/value store
pub mod components;   // built-in services/workers + registries
pub mod config;       // config loading + validation
pub mod context;      // per-event mutable payload
pub mod errors;       // error handling
pub mod observability;
pub mod orchestrator; // lifecycle + runtime hub
pub mod traits;       // component contracts
