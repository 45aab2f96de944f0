//! Definition registry with dependency closure
//!
//! The registry holds one definition per name, together with the names that
//! definition depends on. It answers which definitions a set of names needs,
//! prerequisites first.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut registry = DefinitionRegistry::new();
//!
//! registry.register("user", &[], |dispatch, bases, name, model_name| {
//!     Ok(ModelClass::derive(bases, model_name, dispatch.create_attrs(name)?))
//! })?;
//! registry.register("group", &["user"], define_group)?;
//!
//! assert_eq!(registry.needs(["group"])?, vec!["user", "group"]);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tablekit_core::{Bases, Error, Model, Result};
use tracing::{debug, warn};

use crate::dispatch::Dispatch;

/// Builds a model for one contract entry
///
/// Called with the dispatcher for the running assembly, the bases to derive
/// from, the contract key and the resolved model name. Any closure with the
/// same shape is a definition.
pub trait Definition: Send + Sync {
    /// Build the model
    fn define(
        &self,
        dispatch: &Dispatch<'_>,
        bases: &Bases,
        name: &str,
        model_name: &str,
    ) -> Result<Arc<dyn Model>>;
}

impl<F> Definition for F
where
    F: Fn(&Dispatch<'_>, &Bases, &str, &str) -> Result<Arc<dyn Model>> + Send + Sync,
{
    fn define(
        &self,
        dispatch: &Dispatch<'_>,
        bases: &Bases,
        name: &str,
        model_name: &str,
    ) -> Result<Arc<dyn Model>> {
        self(dispatch, bases, name, model_name)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Registry of named definitions and their dependencies
pub struct DefinitionRegistry {
    /// Definitions by name
    definitions: HashMap<String, Arc<dyn Definition>>,
    /// Declared prerequisites by name
    depends: HashMap<String, Vec<String>>,
    /// Names in first-registration order
    order: Vec<String>,
    /// Reject re-registration of a name
    strict: bool,
}

impl DefinitionRegistry {
    /// Create an empty, non-strict registry
    pub fn new() -> Self {
        DefinitionRegistry {
            definitions: HashMap::new(),
            depends: HashMap::new(),
            order: Vec::new(),
            strict: false,
        }
    }

    /// Create an empty registry that rejects duplicate names
    pub fn strict() -> Self {
        let mut registry = Self::new();
        registry.strict = true;
        registry
    }

    /// Whether duplicate names are rejected
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Toggle duplicate-name rejection
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Register a closure as the definition for `name`
    pub fn register<F>(&mut self, name: &str, depends: &[&str], definition: F) -> Result<()>
    where
        F: Fn(&Dispatch<'_>, &Bases, &str, &str) -> Result<Arc<dyn Model>> + Send + Sync + 'static,
    {
        self.register_definition(name, depends, Arc::new(definition))
    }

    /// Register a definition for `name`
    ///
    /// Re-registering a name replaces both the definition and its
    /// dependencies, unless the registry is strict, in which case it fails
    /// with `DefinitionNameConflict` and leaves the registry untouched.
    pub fn register_definition(
        &mut self,
        name: &str,
        depends: &[&str],
        definition: Arc<dyn Definition>,
    ) -> Result<()> {
        if self.definitions.contains_key(name) {
            if self.strict {
                return Err(Error::DefinitionNameConflict {
                    name: name.to_string(),
                });
            }
            warn!(target: "tablekit::registry", name, "Overwriting registered definition");
        } else {
            self.order.push(name.to_string());
        }

        debug!(target: "tablekit::registry", name, ?depends, "Registered definition");
        self.depends
            .insert(name.to_string(), depends.iter().map(|d| d.to_string()).collect());
        self.definitions.insert(name.to_string(), definition);
        Ok(())
    }

    /// Definition registered under `name`
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Definition>> {
        self.definitions.get(name)
    }

    /// Declared prerequisites of `name`; empty for unknown names
    pub fn depends_of(&self, name: &str) -> &[String] {
        self.depends.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Registered names in first-registration order
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Number of registered definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Dependency closure of `names`, prerequisites first
    ///
    /// Walks each requested name depth-first, emitting its prerequisites
    /// before the name itself. Each name appears once, at its first
    /// encounter across the whole input. Names without a registration are
    /// treated as having no prerequisites.
    ///
    /// This is a flattening of the requested subset, not a global
    /// topological sort of the registry.
    ///
    /// # Errors
    ///
    /// Returns `CyclicDependency` when a prerequisite chain loops back.
    pub fn needs<I, S>(&self, names: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut marks = HashMap::new();
        let mut path = Vec::new();
        let mut out = Vec::new();
        for name in names {
            self.visit(name.as_ref(), &mut marks, &mut path, &mut out)?;
        }
        Ok(out)
    }

    fn visit(
        &self,
        name: &str,
        marks: &mut HashMap<String, Mark>,
        path: &mut Vec<String>,
        out: &mut Vec<String>,
    ) -> Result<()> {
        match marks.get(name) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = path.iter().position(|p| p == name).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(name.to_string());
                return Err(Error::CyclicDependency { path: cycle });
            }
            None => {}
        }

        marks.insert(name.to_string(), Mark::Visiting);
        path.push(name.to_string());
        for depend in self.depends_of(name) {
            self.visit(depend, marks, path, out)?;
        }
        path.pop();
        marks.insert(name.to_string(), Mark::Done);
        out.push(name.to_string());
        Ok(())
    }
}

impl Default for DefinitionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DefinitionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinitionRegistry")
            .field("names", &self.order)
            .field("depends", &self.depends)
            .field("strict", &self.strict)
            .finish()
    }
}
