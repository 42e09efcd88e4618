// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod component;
mod config;
mod dispatch;
mod orchestrator;

pub use component::ComponentError;
pub use config::{ConfigError, ValidationError};
pub use dispatch::{BusError, DispatchError, RegistryError};
pub use orchestrator::{FailurePolicy, OrchestratorError};
