// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging.
//!
//! Centralized message types for diagnostic and operational logging. Message
//! types follow a struct-based pattern with a `Display` implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Enable future internationalization without code changes
//! * Provide consistent, structured logging output
//!
//! Messages are organized by subsystem:
//! * `messages::bus` - event publication and listener chain events
//! * `messages::orchestrator` - lifecycle, wiring, start/stop passes
//! * `messages::component` - worker invocation and fan-out events

pub mod messages;
