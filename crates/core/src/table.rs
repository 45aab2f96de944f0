//! Table and base-class handles
//!
//! These are the external collaborator shapes the assembly layer reads:
//! a table object only has to report its name, and a base class only has to
//! carry a stable key for the provider cache.

use std::fmt;
use std::sync::Arc;

/// Pre-built table object handed in through a contract
///
/// Table identity is the `Arc` allocation: two tables with equal names are
/// still different tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    schema: Option<String>,
}

impl Table {
    /// Create a table in the default schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
        }
    }

    /// Place the table in a named schema
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Unqualified table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schema, if any
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// `schema.name`, or just `name` in the default schema
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }
}

/// Base class that models are derived from
///
/// The key is caller-supplied and stable; it is what the provider cache is
/// keyed on by default, so distinct bases must use distinct names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Base {
    name: String,
}

impl Base {
    /// Create a base class handle
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Base class name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stable cache key for this base
    pub fn key(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Ordered base classes for a derived model: parents first, base last
///
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bases {
    classes: Vec<Arc<Base>>,
}

impl Bases {
    /// Combine optional parents with the required base
    pub fn new(base: Arc<Base>, parents: &[Arc<Base>]) -> Self {
        let mut classes = Vec::with_capacity(parents.len() + 1);
        classes.extend(parents.iter().cloned());
        classes.push(base);
        Self { classes }
    }

    /// Bases made of a single class
    pub fn single(base: Arc<Base>) -> Self {
        Self::new(base, &[])
    }

    /// The required base (last entry)
    pub fn base(&self) -> &Arc<Base> {
        &self.classes[self.classes.len() - 1]
    }

    /// Parents preceding the base
    pub fn parents(&self) -> &[Arc<Base>] {
        &self.classes[..self.classes.len() - 1]
    }

    /// All classes in derivation order
    pub fn as_slice(&self) -> &[Arc<Base>] {
        &self.classes
    }

    /// Iterate classes in derivation order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Base>> {
        self.classes.iter()
    }

    /// Number of classes, at least one
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Always false; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
