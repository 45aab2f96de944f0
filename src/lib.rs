//! tablekit - assemble namespaces of table-mapped models from shared contracts
//!
//! Several definitions of a data model are registered once, each with the
//! names it depends on. A contract then says, per logical name, whether the
//! model maps onto a table name, an existing table object, or is supplied
//! finished. Assembly builds every entry, prerequisites first, and exposes
//! the results under their model names.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use tablekit::{Base, Contract, Descriptor, ModelClass, ModelCreation, ModuleProvider};
//!
//! let mut creation = ModelCreation::new();
//! creation.register("user", &[], |dispatch, bases, name, model_name| {
//!     Ok(ModelClass::derive(bases, model_name, dispatch.create_attrs(name)?))
//! })?;
//!
//! let provider = ModuleProvider::new(creation);
//! let contract = Contract::new().with("user", Descriptor::table_name("users").with_model_name("User"));
//!
//! let models = provider.provide(&Arc::new(Base::new("Base")), &contract, &[])?;
//! assert_eq!(models.get("User").unwrap().table_name(), "users");
//! ```
//!
//! # Architecture
//!
//! Shared types (contracts, models, namespaces, errors) live in
//! `tablekit-core`; the registry, dispatcher, assembler and caching provider
//! live in `tablekit-assembly`. This crate re-exports both.

pub use tablekit_assembly::*;
pub use tablekit_core::*;
