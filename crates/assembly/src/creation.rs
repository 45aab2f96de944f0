//! Module assembly
//!
//! `ModelCreation` owns the definition registry and turns a contract into a
//! namespace: one model per contract entry, bound under its resolved model
//! name. Entries supplying a finished model are taken as-is; every other
//! entry needs a registered definition.
//!
//! Each call to `create` gets its own [`Dispatch`]. A custom dispatch
//! factory can attach per-assembly attribute adjustments to it.

use std::fmt;
use std::sync::Arc;

use tablekit_core::{Bases, Contract, Error, Model, Namespace, Result, Source};
use tracing::{debug, info, warn};

use crate::config::{AssemblyConfig, AssemblyOrder};
use crate::dispatch::Dispatch;
use crate::registry::{Definition, DefinitionRegistry};

/// Builds the dispatcher for one assembly
pub type DispatchFn = Arc<dyn for<'a> Fn(&'a Bases, &'a Contract) -> Dispatch<'a> + Send + Sync>;

fn plain_dispatch<'a>(bases: &'a Bases, contract: &'a Contract) -> Dispatch<'a> {
    Dispatch::new(bases, contract)
}

/// Builds namespaces from contracts using registered definitions
pub struct ModelCreation {
    registry: DefinitionRegistry,
    config: AssemblyConfig,
    dispatch_fn: DispatchFn,
}

impl ModelCreation {
    /// Create with the default configuration
    pub fn new() -> Self {
        Self::with_config(AssemblyConfig::default())
    }

    /// Create with an explicit configuration
    ///
    /// The registry starts strict when `config.strict` is set.
    pub fn with_config(config: AssemblyConfig) -> Self {
        let mut registry = DefinitionRegistry::new();
        registry.set_strict(config.strict);
        Self {
            registry,
            config,
            dispatch_fn: Arc::new(plain_dispatch),
        }
    }

    /// Build each assembly's dispatcher with `dispatch_fn`
    ///
    /// ```rust,ignore
    /// let creation = ModelCreation::new().with_dispatch(|bases, contract| {
    ///     Dispatch::new(bases, contract).with_attrs_adjust(|_name, attrs| {
    ///         attrs.insert("__schema__", json!("tenant_a"));
    ///     })
    /// });
    /// ```
    pub fn with_dispatch<F>(mut self, dispatch_fn: F) -> Self
    where
        F: for<'a> Fn(&'a Bases, &'a Contract) -> Dispatch<'a> + Send + Sync + 'static,
    {
        self.dispatch_fn = Arc::new(dispatch_fn);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    /// Definition registry
    pub fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    /// Mutable definition registry
    pub fn registry_mut(&mut self) -> &mut DefinitionRegistry {
        &mut self.registry
    }

    /// Register a closure as the definition for `name`
    pub fn register<F>(&mut self, name: &str, depends: &[&str], definition: F) -> Result<()>
    where
        F: Fn(&Dispatch<'_>, &Bases, &str, &str) -> Result<Arc<dyn Model>> + Send + Sync + 'static,
    {
        self.registry.register(name, depends, definition)
    }

    /// Register a definition for `name`
    pub fn register_definition(
        &mut self,
        name: &str,
        depends: &[&str],
        definition: Arc<dyn Definition>,
    ) -> Result<()> {
        self.registry.register_definition(name, depends, definition)
    }

    /// Dependency closure of `names`, prerequisites first
    pub fn needs<I, S>(&self, names: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.registry.needs(names)
    }

    /// Assemble a fresh namespace for `contract`
    ///
    /// Fails with `DefinitionNotFound` for an entry that has neither a
    /// registered definition nor a finished model, and propagates any
    /// definition error. Nothing is returned on failure.
    pub fn create(&self, bases: &Bases, contract: &Contract) -> Result<Namespace> {
        let mut namespace = Namespace::new(self.config.module_name.as_str());
        let mut dispatch = (self.dispatch_fn)(bases, contract);

        for name in self.build_order(contract)? {
            let descriptor = dispatch.target_of(&name)?;
            let model_name = dispatch.model_name_of(&name).to_string();

            let model = match descriptor.source() {
                Source::Model(model) => {
                    debug!(target: "tablekit::assembly", %name, %model_name, "Using supplied model");
                    model.clone()
                }
                _ => {
                    let definition =
                        self.registry
                            .get(&name)
                            .ok_or_else(|| Error::DefinitionNotFound {
                                name: name.clone(),
                                registered: self.registry.names().to_vec(),
                            })?;
                    debug!(target: "tablekit::assembly", %name, %model_name, "Running definition");
                    dispatch.create_model(definition.as_ref(), &name, &model_name)?
                }
            };

            dispatch.record(&name, model.clone());
            if namespace.insert(model_name.as_str(), model).is_some() {
                warn!(target: "tablekit::assembly", %name, %model_name, "Model name bound twice; keeping the later model");
            }
        }

        info!(
            target: "tablekit::assembly",
            module = %namespace.qualified_name(),
            base = %bases.base(),
            models = namespace.len(),
            "Namespace assembled"
        );
        Ok(namespace)
    }

    fn build_order(&self, contract: &Contract) -> Result<Vec<String>> {
        match self.config.order {
            AssemblyOrder::Contract => Ok(contract.keys().map(String::from).collect()),
            AssemblyOrder::Dependency => Ok(self
                .registry
                .needs(contract.keys())?
                .into_iter()
                .filter(|name| contract.contains(name))
                .collect()),
        }
    }
}

impl Default for ModelCreation {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ModelCreation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCreation")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}
