// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The per-event payload.
//!
//! A context is created by the event source, handed mutably down the listener
//! chain, and dropped when the publish call returns. It carries JSON-like
//! values so config-declared workers and hand-written ones exchange data
//! without a shared schema.

use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// Mutable string-keyed JSON payload shared along one dispatch chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context(Map<String, Value>);

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<Map<String, Value>> for Context {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl Display for Context {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_get_remove() {
        let mut ctx = Context::new();
        assert!(ctx.is_empty());

        ctx.set("count", json!(1));
        ctx.set("count", json!(2));
        assert_eq!(ctx.get("count"), Some(&json!(2)));
        assert_eq!(ctx.len(), 1);
        assert!(ctx.contains("count"));

        assert_eq!(ctx.remove("count"), Some(json!(2)));
        assert_eq!(ctx.get("count"), None);
    }

    #[test]
    fn clone_is_independent() {
        let mut original = Context::new();
        original.set("shared", json!(true));

        let mut copy = original.clone();
        copy.set("copied", json!(1));

        assert!(!original.contains("copied"));
        assert_eq!(original.len(), 1);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn displays_as_json() {
        let mut ctx = Context::new();
        ctx.set("a", json!(1));
        assert_eq!(ctx.to_string(), r#"{"a":1}"#);
    }
}
