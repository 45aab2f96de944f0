//! Model types
//!
//! A model is anything that can report which table it maps to. Callers may
//! hand in their own [`Model`] implementations as pre-built models; models
//! built by definitions are usually [`ModelClass`] values derived from a set
//! of [`Bases`] plus [`ModelAttrs`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::table::{Base, Bases, Table};

/// Attribute key under which a table name is exposed
pub const TABLENAME_ATTR: &str = "__tablename__";
/// Attribute key under which a table object is exposed
pub const TABLE_ATTR: &str = "__table__";

/// A constructed model
pub trait Model: fmt::Debug + Send + Sync {
    /// Name the model was built under
    fn name(&self) -> &str;

    /// Effective table name
    fn table_name(&self) -> &str;

    /// Table object, when the model was mapped onto one
    fn table(&self) -> Option<&Arc<Table>> {
        None
    }

    /// Classes the model derives from
    fn bases(&self) -> &[Arc<Base>] {
        &[]
    }

    /// Extra attribute set while the model was built
    fn attr(&self, _key: &str) -> Option<&JsonValue> {
        None
    }
}

/// Where a model's table identity comes from
#[derive(Debug, Clone)]
pub enum TableSource {
    /// Mapped by table name (`__tablename__`)
    TableName(String),
    /// Mapped onto an existing table object (`__table__`)
    Table(Arc<Table>),
}

impl TableSource {
    /// Table name regardless of source
    pub fn table_name(&self) -> &str {
        match self {
            TableSource::TableName(name) => name,
            TableSource::Table(table) => table.name(),
        }
    }

    /// Attribute key this source is exposed under
    pub fn attr_key(&self) -> &'static str {
        match self {
            TableSource::TableName(_) => TABLENAME_ATTR,
            TableSource::Table(_) => TABLE_ATTR,
        }
    }
}

/// Attributes used to construct a model class
///
/// Always carries exactly one table source. Hooks may add extra attributes
/// or replace the source before the model is derived.
#[derive(Debug, Clone)]
pub struct ModelAttrs {
    source: TableSource,
    extra: BTreeMap<String, JsonValue>,
}

impl ModelAttrs {
    /// Attributes mapping onto a table name
    pub fn with_table_name(name: impl Into<String>) -> Self {
        Self {
            source: TableSource::TableName(name.into()),
            extra: BTreeMap::new(),
        }
    }

    /// Attributes mapping onto a table object
    pub fn with_table(table: Arc<Table>) -> Self {
        Self {
            source: TableSource::Table(table),
            extra: BTreeMap::new(),
        }
    }

    /// Table source
    pub fn source(&self) -> &TableSource {
        &self.source
    }

    /// Replace the table source
    pub fn set_source(&mut self, source: TableSource) {
        self.source = source;
    }

    /// Value of `__tablename__`, if mapped by name
    pub fn tablename(&self) -> Option<&str> {
        match &self.source {
            TableSource::TableName(name) => Some(name),
            TableSource::Table(_) => None,
        }
    }

    /// Value of `__table__`, if mapped onto a table object
    pub fn table(&self) -> Option<&Arc<Table>> {
        match &self.source {
            TableSource::Table(table) => Some(table),
            TableSource::TableName(_) => None,
        }
    }

    /// Set an extra attribute, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: JsonValue) -> Option<JsonValue> {
        self.extra.insert(key.into(), value)
    }

    /// Extra attribute by key
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.extra.get(key)
    }

    /// All extra attributes
    pub fn extra(&self) -> &BTreeMap<String, JsonValue> {
        &self.extra
    }
}

/// Model class derived from bases and attributes
#[derive(Debug, Clone)]
pub struct ModelClass {
    name: String,
    bases: Bases,
    attrs: ModelAttrs,
}

impl ModelClass {
    /// Derive a model class
    pub fn new(bases: &Bases, name: impl Into<String>, attrs: ModelAttrs) -> Self {
        Self {
            name: name.into(),
            bases: bases.clone(),
            attrs,
        }
    }

    /// Derive a model class, returned as a shared trait object
    pub fn derive(bases: &Bases, name: impl Into<String>, attrs: ModelAttrs) -> Arc<dyn Model> {
        Arc::new(Self::new(bases, name, attrs))
    }

    /// Attributes the class was built with
    pub fn attrs(&self) -> &ModelAttrs {
        &self.attrs
    }
}

impl Model for ModelClass {
    fn name(&self) -> &str {
        &self.name
    }

    fn table_name(&self) -> &str {
        self.attrs.source.table_name()
    }

    fn table(&self) -> Option<&Arc<Table>> {
        self.attrs.table()
    }

    fn bases(&self) -> &[Arc<Base>] {
        self.bases.as_slice()
    }

    fn attr(&self, key: &str) -> Option<&JsonValue> {
        self.attrs.get(key)
    }
}
