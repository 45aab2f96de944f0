//! Assembled namespace of models

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::model::Model;

static NEXT_NAMESPACE_ID: AtomicU64 = AtomicU64::new(1);

/// Models produced by one assembly, keyed by resolved model name
///
/// Every namespace gets a process-unique id, so two assemblies under the same
/// module name are still distinguishable.
#[derive(Debug)]
pub struct Namespace {
    id: u64,
    module_name: String,
    models: BTreeMap<String, Arc<dyn Model>>,
}

impl Namespace {
    /// Create an empty namespace
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            id: NEXT_NAMESPACE_ID.fetch_add(1, Ordering::Relaxed),
            module_name: module_name.into(),
            models: BTreeMap::new(),
        }
    }

    /// Process-unique namespace id
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Module name the namespace was created under
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// `module_name#id`
    pub fn qualified_name(&self) -> String {
        format!("{}#{}", self.module_name, self.id)
    }

    /// Bind a model under `name`, returning the model it replaced
    pub fn insert(&mut self, name: impl Into<String>, model: Arc<dyn Model>) -> Option<Arc<dyn Model>> {
        self.models.insert(name.into(), model)
    }

    /// Model bound under `name`
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Model>> {
        self.models.get(name)
    }

    /// Whether `name` is bound
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Bound names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Bindings, sorted by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Model>)> {
        self.models.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of bound models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// True when nothing is bound
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
