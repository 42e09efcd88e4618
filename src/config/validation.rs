// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Cross-reference validation of a loaded config document.
//!
//! This is not schema validation: the document's shape is whatever serde
//! accepted. Validation only checks that ids referenced in one section are
//! declared in another, collecting every problem instead of stopping at the
//! first one.

use crate::config::Config;
use crate::errors::ValidationError;

/// Check that flows list declared workers and service events trigger
/// declared flows.
pub fn validate_references(cfg: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (flow_id, worker_ids) in &cfg.flows {
        for worker_id in worker_ids {
            if !cfg.workers.contains_key(worker_id) {
                errors.push(ValidationError::UnknownWorkerInFlow {
                    flow_id: flow_id.clone(),
                    worker_id: worker_id.clone(),
                });
            }
        }
    }

    for (service_id, entry) in &cfg.services {
        for (event, flow_ids) in &entry.events {
            for flow_id in flow_ids {
                if !cfg.flows.contains_key(flow_id) {
                    errors.push(ValidationError::UnknownFlowInEvent {
                        service_id: service_id.clone(),
                        event: event.clone(),
                        flow_id: flow_id.clone(),
                    });
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
