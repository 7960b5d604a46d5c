//! Type-name registry, populated at startup.
//!
//! Resolves stored fully qualified type names to known component types
//! without runtime type discovery.

use crate::unity::ScriptIndex;
use resfinder_api::ComponentDescriptor;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    pub name: String,
    pub namespace: Option<String>,
    /// Script guid, for types backed by a script file
    pub guid: Option<String>,
}

impl TypeEntry {
    pub fn full_name(&self) -> String {
        self.descriptor().full_name()
    }

    pub fn descriptor(&self) -> ComponentDescriptor {
        let descriptor = ComponentDescriptor::new(self.name.clone());
        match &self.namespace {
            Some(ns) => descriptor.with_namespace(ns.clone()),
            None => descriptor,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    by_full_name: HashMap<String, TypeEntry>,
    /// Registration order, for deterministic short-name lookups
    order: Vec<String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_scripts(scripts: &ScriptIndex) -> Self {
        let mut infos: Vec<_> = scripts.iter().collect();
        infos.sort_by(|a, b| a.path.cmp(&b.path));

        let mut registry = Self::new();
        for info in infos {
            registry.register(TypeEntry {
                name: info.name.clone(),
                namespace: info.namespace.clone(),
                guid: Some(info.guid.clone()),
            });
        }
        registry
    }

    /// Adds `entry`; a later registration with the same full name replaces it.
    pub fn register(&mut self, entry: TypeEntry) {
        let full_name = entry.full_name();
        if self.by_full_name.insert(full_name.clone(), entry).is_none() {
            self.order.push(full_name);
        }
    }

    pub fn resolve(&self, full_name: &str) -> Option<&TypeEntry> {
        self.by_full_name.get(full_name)
    }

    /// First registered type whose short name is `name`.
    pub fn find_by_name(&self, name: &str) -> Option<&TypeEntry> {
        self.order
            .iter()
            .filter_map(|full| self.by_full_name.get(full))
            .find(|entry| entry.name == name)
    }

    pub fn len(&self) -> usize {
        self.by_full_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_full_name.is_empty()
    }
}
