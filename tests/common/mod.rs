//! Shared test utilities for all integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use serde_json::json;
pub use tablekit::{
    AssemblyConfig, AssemblyOrder, Base, Bases, Contract, Descriptor, Dispatch, Error, Model,
    ModelAttrs, ModelClass, ModelCreation, ModuleProvider, Namespace, Result, Source, Table,
};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route tracing output through the test harness once per process.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

pub fn base(name: &str) -> Arc<Base> {
    Arc::new(Base::new(name))
}

// ============================================================================
// Definitions
// ============================================================================

/// Plain definition: derive from bases with the contract's table attributes.
pub fn define_from_attrs(
    dispatch: &Dispatch<'_>,
    bases: &Bases,
    name: &str,
    model_name: &str,
) -> Result<Arc<dyn Model>> {
    Ok(ModelClass::derive(bases, model_name, dispatch.create_attrs(name)?))
}

/// Definition for link tables: records the table names of its prerequisites.
fn define_link(
    dispatch: &Dispatch<'_>,
    bases: &Bases,
    name: &str,
    model_name: &str,
) -> Result<Arc<dyn Model>> {
    let mut links = Vec::new();
    for prerequisite in ["user", "group"] {
        let model = dispatch.built(prerequisite).ok_or_else(|| {
            Error::invalid_definition(format!("{} built before {}", name, prerequisite))
        })?;
        links.push(model.table_name().to_string());
    }
    let mut attrs = dispatch.create_attrs(name)?;
    attrs.insert("__links__", json!(links));
    Ok(ModelClass::derive(bases, model_name, attrs))
}

/// Registers `user`, `group`, `post` (needs `user`) and `user_group`
/// (needs `user` and `group`).
pub fn blog_creation(config: AssemblyConfig) -> ModelCreation {
    let mut creation = ModelCreation::with_config(config);
    creation.register("user", &[], define_from_attrs).unwrap();
    creation.register("group", &[], define_from_attrs).unwrap();
    creation.register("post", &["user"], define_from_attrs).unwrap();
    creation
        .register("user_group", &["user", "group"], define_link)
        .unwrap();
    creation
}

/// Contract covering every blog definition, listed dependents first.
pub fn blog_contract() -> Contract {
    Contract::new()
        .with("user_group", Descriptor::table_name("user_groups").with_model_name("UserGroup"))
        .with("post", Descriptor::table_name("posts").with_model_name("Post"))
        .with("user", Descriptor::table_name("users").with_model_name("User"))
        .with("group", Descriptor::table(Arc::new(Table::new("groups"))).with_model_name("Group"))
}

/// Creation whose every definition bumps `counter`.
pub fn counting_creation(names: &[&str], counter: Arc<AtomicUsize>) -> ModelCreation {
    let mut creation = ModelCreation::new();
    for name in names {
        let counter = counter.clone();
        creation
            .register(name, &[], move |dispatch, bases, name, model_name| {
                counter.fetch_add(1, Ordering::SeqCst);
                define_from_attrs(dispatch, bases, name, model_name)
            })
            .unwrap();
    }
    creation
}
