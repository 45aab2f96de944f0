//! Model assembly for tablekit
//!
//! This crate turns contracts into namespaces of models:
//! - DefinitionRegistry: named definitions and their dependency closure
//! - Dispatch: per-assembly interpretation of contract descriptors
//! - ModelCreation: builds one namespace per call from registered definitions
//! - ModuleProvider: caches assembled namespaces per base class
//! - AssemblyConfig: TOML settings (module name, strictness, order)
//!
//! Assembly is synchronous and runs to completion or fails without
//! returning a partial namespace.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod creation;
pub mod dispatch;
pub mod provider;
pub mod registry;

pub use config::{AssemblyConfig, AssemblyOrder, DEFAULT_MODULE_NAME};
pub use creation::{DispatchFn, ModelCreation};
pub use dispatch::{AttrsAdjust, AttrsHook, Dispatch};
pub use provider::{KeyFn, ModuleProvider};
pub use registry::{Definition, DefinitionRegistry};
