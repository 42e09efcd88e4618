// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Kind-name → constructor registries for services and workers.
//!
//! A registry is a plugin table, not reflection: each collaborator module
//! registers its kind name once at startup with a closure producing a fresh,
//! uninitialized instance. Kind names match case-insensitively and later
//! registrations overwrite earlier ones without complaint.

use std::collections::HashMap;

use crate::errors::RegistryError;
use crate::traits::{Service, Worker};

type Maker<T> = Box<dyn Fn() -> Box<T> + Send + Sync>;

/// Maps a kind name to a constructor producing a boxed component.
pub struct Registry<T: ?Sized> {
    /// Label used in error messages ("service" / "worker").
    collection: &'static str,
    makers: HashMap<String, Maker<T>>,
}

impl<T: ?Sized> Registry<T> {
    pub fn new(collection: &'static str) -> Self {
        Self {
            collection,
            makers: HashMap::new(),
        }
    }

    /// Store a constructor under a kind name, overwriting any earlier one.
    pub fn register<F>(&mut self, kind: &str, maker: F)
    where
        F: Fn() -> Box<T> + Send + Sync + 'static,
    {
        self.makers.insert(kind.to_lowercase(), Box::new(maker));
    }

    /// Invoke the constructor for a kind, producing a fresh, uninitialized
    /// instance.
    pub fn make(&self, kind: &str) -> Result<Box<T>, RegistryError> {
        let maker = self
            .makers
            .get(&kind.to_lowercase())
            .ok_or_else(|| RegistryError::UnknownKind {
                collection: self.collection,
                kind: kind.to_string(),
            })?;
        Ok(maker())
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.makers.contains_key(&kind.to_lowercase())
    }

    /// All registered kind names, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.makers.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl<T: ?Sized> std::fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("collection", &self.collection)
            .field("kinds", &self.kinds())
            .finish()
    }
}

pub type ServiceRegistry = Registry<dyn Service>;
pub type WorkerRegistry = Registry<dyn Worker>;
