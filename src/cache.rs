// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-memory key/value cache shared through the hub.
//!
//! Components that need to pass state outside a single dispatch chain can use
//! the cache; the core itself never reads it.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// A process-local cache of JSON-like values.
#[derive(Debug, Default)]
pub struct MemoryCache {
    data: Mutex<HashMap<String, Value>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.data.lock().expect("cache lock").insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.data.lock().expect("cache lock").get(key).cloned()
    }

    pub fn del(&self, key: &str) {
        self.data.lock().expect("cache lock").remove(key);
    }

    pub fn clear(&self) {
        self.data.lock().expect("cache lock").clear();
    }

    pub fn len(&self) -> usize {
        self.data.lock().expect("cache lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_get_del() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("missing"), None);

        cache.set("k", json!({ "n": 1 }));
        assert_eq!(cache.get("k"), Some(json!({ "n": 1 })));

        cache.set("k", json!(2));
        assert_eq!(cache.get("k"), Some(json!(2)));

        cache.del("k");
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn clear_releases_everything() {
        let cache = MemoryCache::new();
        cache.set("a", json!(1));
        cache.set("b", json!(2));
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }
}
