// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod component;

pub use component::{ComponentConfig, ComponentInfo, Service, Worker};
