//! Contract types
//!
//! A contract maps logical names to descriptors. Each descriptor says how a
//! model gets its table identity: by table name, by a table object, or by
//! supplying a finished model outright. An optional `model_name` renames the
//! entry in the assembled namespace.
//!
//! Contracts made only of table names and table objects can also be written
//! in TOML:
//!
//! ```toml
//! [user]
//! table_name = "users"
//! model_name = "User"
//!
//! [group]
//! table = { name = "groups", schema = "auth" }
//! ```

use std::sync::Arc;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::Model;
use crate::table::Table;

/// How a contract entry obtains its table identity
#[derive(Debug, Clone)]
pub enum Source {
    /// Table name only; the definition builds the model
    TableName(String),
    /// Existing table object; the definition builds the model
    Table(Arc<Table>),
    /// Finished model, used as-is
    Model(Arc<dyn Model>),
}

/// One contract entry
#[derive(Debug, Clone)]
pub struct Descriptor {
    source: Source,
    model_name: Option<String>,
}

impl Descriptor {
    /// Entry mapped by table name
    pub fn table_name(name: impl Into<String>) -> Self {
        Self::from_source(Source::TableName(name.into()))
    }

    /// Entry mapped onto a table object
    pub fn table(table: Arc<Table>) -> Self {
        Self::from_source(Source::Table(table))
    }

    /// Entry supplying a finished model
    pub fn model(model: Arc<dyn Model>) -> Self {
        Self::from_source(Source::Model(model))
    }

    /// Entry from an explicit source
    pub fn from_source(source: Source) -> Self {
        Self {
            source,
            model_name: None,
        }
    }

    /// Expose the entry under a different name
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = Some(model_name.into());
        self
    }

    /// Entry source
    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Model name override, if any
    pub fn model_name(&self) -> Option<&str> {
        self.model_name.as_deref()
    }

    /// Has a table name
    pub fn is_table_name(&self) -> bool {
        matches!(self.source, Source::TableName(_))
    }

    /// Has a table object
    pub fn is_table(&self) -> bool {
        matches!(self.source, Source::Table(_))
    }

    /// Has a finished model
    pub fn is_model(&self) -> bool {
        matches!(self.source, Source::Model(_))
    }
}

/// Insertion-ordered mapping from logical name to descriptor
#[derive(Debug, Clone, Default)]
pub struct Contract {
    entries: Vec<(String, Descriptor)>,
}

impl Contract {
    /// Create an empty contract
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, descriptor: Descriptor) -> Self {
        self.insert(name, descriptor);
        self
    }

    /// Insert or replace an entry
    ///
    /// A replaced entry keeps its original position. Returns the previous
    /// descriptor for `name`, if any.
    pub fn insert(&mut self, name: impl Into<String>, descriptor: Descriptor) -> Option<Descriptor> {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, descriptor)),
            None => {
                self.entries.push((name, descriptor));
                None
            }
        }
    }

    /// Descriptor for `name`
    pub fn get(&self, name: &str) -> Option<&Descriptor> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, descriptor)| descriptor)
    }

    /// Whether `name` has an entry
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Entry names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Descriptor)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the contract has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a contract from TOML
    ///
    /// Every top-level table is one entry and must set exactly one of
    /// `table_name` or `table`. Finished models cannot be expressed in TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let root: toml::Table = toml::from_str(content)
            .map_err(|e| Error::invalid_contract(format!("unreadable contract: {}", e.message())))?;
        let mut contract = Contract::new();
        for (name, value) in root {
            let entry: TomlEntry = value.try_into().map_err(|e: toml::de::Error| {
                Error::invalid_contract(format!("contract[{}]: {}", name, e.message()))
            })?;
            let descriptor = entry.into_descriptor(&name)?;
            contract.insert(name, descriptor);
        }
        Ok(contract)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlEntry {
    #[serde(default)]
    table_name: Option<String>,
    #[serde(default)]
    table: Option<TomlTable>,
    #[serde(default)]
    model_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlTable {
    name: String,
    #[serde(default)]
    schema: Option<String>,
}

impl TomlEntry {
    fn into_descriptor(self, name: &str) -> Result<Descriptor> {
        let descriptor = match (self.table_name, self.table) {
            (Some(table_name), None) => Descriptor::table_name(table_name),
            (None, Some(entry_table)) => {
                let mut table = Table::new(entry_table.name);
                if let Some(schema) = entry_table.schema {
                    table = table.with_schema(schema);
                }
                Descriptor::table(Arc::new(table))
            }
            (Some(_), Some(_)) => {
                return Err(Error::invalid_contract(format!(
                    "contract[{}] sets both 'table_name' and 'table'",
                    name
                )))
            }
            (None, None) => {
                return Err(Error::invalid_contract(format!(
                    "contract[{}] must include 'table_name' or 'table'",
                    name
                )))
            }
        };
        Ok(match self.model_name {
            Some(model_name) => descriptor.with_model_name(model_name),
            None => descriptor,
        })
    }
}
