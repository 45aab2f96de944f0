//! Caching namespace provider
//!
//! Wraps a [`ModelCreation`] so that each base class gets its namespace
//! assembled at most once. Later calls for the same base return the cached
//! `Arc<Namespace>`.
//!
//! The cache is keyed on the base alone. A second call with the same base
//! and a different contract returns the namespace built from the first
//! contract; contracts never invalidate a cached entry. Entries are only
//! dropped by [`ModuleProvider::clear`] or by dropping the provider.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tablekit_core::{Base, Bases, Contract, Error, Namespace, Result};
use tracing::{debug, info};

use crate::creation::ModelCreation;

/// Maps a base class to its cache key
pub type KeyFn = Box<dyn Fn(&Base) -> String + Send + Sync>;

/// Assembles namespaces once per base class and serves them from cache
pub struct ModuleProvider {
    creation: ModelCreation,
    key_fn: KeyFn,
    /// Assembled namespaces by base key
    cache: Mutex<HashMap<String, Arc<Namespace>>>,
}

impl ModuleProvider {
    /// Create a provider keyed on [`Base::key`]
    pub fn new(creation: ModelCreation) -> Self {
        Self::with_key_fn(creation, |base: &Base| base.key().to_string())
    }

    /// Create a provider with a custom cache key
    pub fn with_key_fn<F>(creation: ModelCreation, key_fn: F) -> Self
    where
        F: Fn(&Base) -> String + Send + Sync + 'static,
    {
        Self {
            creation,
            key_fn: Box::new(key_fn),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Wrapped assembler
    pub fn creation(&self) -> &ModelCreation {
        &self.creation
    }

    /// Dependency closure of `names`, prerequisites first
    pub fn needs<I, S>(&self, names: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.creation.needs(names)
    }

    /// Check that `contract` can be assembled
    ///
    /// Every name in the dependency closure of the contract's keys must have
    /// its own entry; dependencies are never filled in implicitly.
    ///
    /// # Errors
    ///
    /// `InvalidContract` for an empty contract or a missing needed entry,
    /// `CyclicDependency` when the declared dependencies loop.
    pub fn verify_contract(&self, contract: &Contract) -> Result<()> {
        if contract.is_empty() {
            return Err(Error::invalid_contract("contract is empty"));
        }
        for name in self.needs(contract.keys())? {
            if !contract.contains(&name) {
                let present: Vec<&str> = contract.keys().collect();
                return Err(Error::invalid_contract(format!(
                    "{} is missing in contract({:?})",
                    name, present
                )));
            }
        }
        Ok(())
    }

    /// Namespace for `base`, assembling it on first use
    ///
    /// The contract is validated on every call. On a cache miss the models
    /// are derived from `parents` followed by `base`.
    ///
    /// The cache lock is held while assembling, so concurrent callers for
    /// an unseen base build it once. Definitions must not call back into
    /// the same provider.
    pub fn provide(
        &self,
        base: &Arc<Base>,
        contract: &Contract,
        parents: &[Arc<Base>],
    ) -> Result<Arc<Namespace>> {
        self.verify_contract(contract)?;
        let key = (self.key_fn)(base.as_ref());

        let mut cache = self.cache.lock();
        if let Some(namespace) = cache.get(&key) {
            debug!(target: "tablekit::provider", %key, "Returning cached namespace");
            return Ok(namespace.clone());
        }

        let bases = Bases::new(base.clone(), parents);
        let namespace = Arc::new(self.creation.create(&bases, contract)?);
        info!(
            target: "tablekit::provider",
            %key,
            module = %namespace.qualified_name(),
            "Cached new namespace"
        );
        cache.insert(key, namespace.clone());
        Ok(namespace)
    }

    /// Cached namespace for `key`, if assembled
    pub fn cached(&self, key: &str) -> Option<Arc<Namespace>> {
        self.cache.lock().get(key).cloned()
    }

    /// Number of cached namespaces
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// True when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Drop every cached namespace
    pub fn clear(&self) {
        self.cache.lock().clear();
    }
}

impl fmt::Debug for ModuleProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleProvider")
            .field("creation", &self.creation)
            .field("cached", &self.len())
            .finish()
    }
}
