//! Contract dispatch
//!
//! A `Dispatch` is created for one assembly call. It interprets contract
//! descriptors: it resolves model and table names, builds the attributes a
//! definition derives its model from, and decides whether a definition runs
//! at all or a supplied model is reused.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tablekit_core::{Bases, Contract, Descriptor, Error, Model, ModelAttrs, Result, Source};

use crate::registry::Definition;

/// Callback that adjusts freshly built attributes
pub type AttrsHook<'h> = &'h dyn Fn(&mut ModelAttrs);

/// Adjustment applied to the attributes of every entry, given its contract key
pub type AttrsAdjust = Arc<dyn Fn(&str, &mut ModelAttrs) + Send + Sync>;

/// Per-assembly interpreter of a contract
pub struct Dispatch<'a> {
    bases: &'a Bases,
    contract: &'a Contract,
    /// Runs after the per-source hooks in `create_attrs_with`
    adjust: Option<AttrsAdjust>,
    /// Models produced so far in this assembly, by contract key
    built: HashMap<String, Arc<dyn Model>>,
}

impl<'a> Dispatch<'a> {
    /// Create a dispatcher over `contract`, deriving models from `bases`
    pub fn new(bases: &'a Bases, contract: &'a Contract) -> Self {
        Self {
            bases,
            contract,
            adjust: None,
            built: HashMap::new(),
        }
    }

    /// Adjust the attributes of every entry this dispatcher builds
    ///
    /// Replaces any earlier adjustment.
    pub fn with_attrs_adjust<F>(mut self, adjust: F) -> Self
    where
        F: Fn(&str, &mut ModelAttrs) + Send + Sync + 'static,
    {
        self.adjust = Some(Arc::new(adjust));
        self
    }

    /// Bases models are derived from
    pub fn bases(&self) -> &'a Bases {
        self.bases
    }

    /// Contract being dispatched
    pub fn contract(&self) -> &'a Contract {
        self.contract
    }

    /// Descriptor for `name`
    pub fn target_of(&self, name: &str) -> Result<&'a Descriptor> {
        self.contract
            .get(name)
            .ok_or_else(|| Error::invalid_contract(format!("{} is missing in contract", name)))
    }

    /// Name the entry is exposed under: its override, or `name` itself
    pub fn model_name_of<'n>(&'n self, name: &'n str) -> &'n str {
        self.contract
            .get(name)
            .and_then(Descriptor::model_name)
            .unwrap_or(name)
    }

    /// Effective table name for `name`
    ///
    /// Taken from the table name, the table object's name, or the supplied
    /// model's table name, whichever the descriptor carries.
    pub fn table_name_of(&self, name: &str) -> Result<String> {
        let table_name = match self.target_of(name)?.source() {
            Source::TableName(table_name) => table_name.clone(),
            Source::Table(table) => table.name().to_string(),
            Source::Model(model) => model.table_name().to_string(),
        };
        Ok(table_name)
    }

    /// Attributes for building the model of `name`
    pub fn create_attrs(&self, name: &str) -> Result<ModelAttrs> {
        self.create_attrs_with(name, None, None)
    }

    /// Attributes for building the model of `name`, adjusted by hooks
    ///
    /// `on_tablename` runs on attributes mapped by table name, `on_table` on
    /// attributes mapped onto a table object. The dispatcher's own
    /// adjustment, if any, runs last.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidContract` when the descriptor carries neither a
    /// table name nor a table, which includes descriptors supplying a
    /// finished model.
    pub fn create_attrs_with(
        &self,
        name: &str,
        on_table: Option<AttrsHook<'_>>,
        on_tablename: Option<AttrsHook<'_>>,
    ) -> Result<ModelAttrs> {
        let mut attrs = match self.target_of(name)?.source() {
            Source::TableName(table_name) => {
                let mut attrs = ModelAttrs::with_table_name(table_name.clone());
                if let Some(hook) = on_tablename {
                    hook(&mut attrs);
                }
                attrs
            }
            Source::Table(table) => {
                let mut attrs = ModelAttrs::with_table(table.clone());
                if let Some(hook) = on_table {
                    hook(&mut attrs);
                }
                attrs
            }
            Source::Model(_) => {
                return Err(Error::invalid_contract(format!(
                    "table name not found. contract[{}]",
                    name
                )))
            }
        };
        if let Some(adjust) = &self.adjust {
            adjust(name, &mut attrs);
        }
        Ok(attrs)
    }

    /// Model for `name`
    ///
    /// A supplied model is returned unchanged without running `definition`.
    /// Otherwise `definition` builds the model from this dispatcher and the
    /// bases.
    pub fn create_model(
        &self,
        definition: &dyn Definition,
        name: &str,
        model_name: &str,
    ) -> Result<Arc<dyn Model>> {
        if let Source::Model(model) = self.target_of(name)?.source() {
            return Ok(model.clone());
        }
        definition.define(self, self.bases, name, model_name)
    }

    /// Model already built for `name` earlier in this assembly
    pub fn built(&self, name: &str) -> Option<&Arc<dyn Model>> {
        self.built.get(name)
    }

    pub(crate) fn record(&mut self, name: &str, model: Arc<dyn Model>) {
        self.built.insert(name.to_string(), model);
    }
}

impl fmt::Debug for Dispatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("bases", self.bases)
            .field("contract", &self.contract.keys().collect::<Vec<_>>())
            .field("adjusted", &self.adjust.is_some())
            .field("built", &self.built.keys().collect::<Vec<_>>())
            .finish()
    }
}
