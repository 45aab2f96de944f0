//! Core types for tablekit
//!
//! This crate defines the foundational types shared by the assembly layer:
//! - Error: Error type hierarchy
//! - Table, Base, Bases: external collaborator handles
//! - Model, ModelClass, ModelAttrs: model construction inputs and outputs
//! - Contract, Descriptor, Source: per-name instructions for building models
//! - Namespace: the assembled output

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
pub mod error;
pub mod model;
pub mod namespace;
pub mod table;

pub use contract::{Contract, Descriptor, Source};
pub use error::{Error, Result};
pub use model::{Model, ModelAttrs, ModelClass, TableSource, TABLENAME_ATTR, TABLE_ATTR};
pub use namespace::Namespace;
pub use table::{Base, Bases, Table};
