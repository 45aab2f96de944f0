//! Provider cache: one namespace per base key

use crate::common::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn same_base_returns_identical_namespace() {
    init_tracing();
    let provider = ModuleProvider::new(blog_creation(AssemblyConfig::default()));
    let base = base("Base");

    let first = provider.provide(&base, &blog_contract(), &[]).unwrap();
    let second = provider.provide(&base, &blog_contract(), &[]).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.id(), second.id());
}

#[test]
fn cache_ignores_a_different_contract_for_the_same_base() {
    let provider = ModuleProvider::new(blog_creation(AssemblyConfig::default()));
    let base = base("Base");

    let first = provider.provide(&base, &blog_contract(), &[]).unwrap();
    let renamed = Contract::new().with("user", Descriptor::table_name("people").with_model_name("Person"));
    let second = provider.provide(&base, &renamed, &[]).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(second.contains("User"));
    assert!(!second.contains("Person"));
}

#[test]
fn equal_base_names_share_a_cache_entry() {
    let provider = ModuleProvider::new(blog_creation(AssemblyConfig::default()));
    let first = provider.provide(&base("Base"), &blog_contract(), &[]).unwrap();
    let second = provider.provide(&base("Base"), &blog_contract(), &[]).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn definitions_run_once_per_base() {
    let counter = Arc::new(AtomicUsize::new(0));
    let provider = ModuleProvider::new(counting_creation(&["user", "group"], counter.clone()));
    let contract = Contract::new()
        .with("user", Descriptor::table_name("users"))
        .with("group", Descriptor::table_name("groups"));

    for _ in 0..3 {
        provider.provide(&base("A"), &contract, &[]).unwrap();
    }
    assert_eq!(counter.load(Ordering::SeqCst), 2);

    provider.provide(&base("B"), &contract, &[]).unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 4);
    assert_eq!(provider.len(), 2);
}

#[test]
fn contract_is_validated_even_on_cache_hit() {
    let provider = ModuleProvider::new(blog_creation(AssemblyConfig::default()));
    let base = base("Base");
    provider.provide(&base, &blog_contract(), &[]).unwrap();

    let err = provider.provide(&base, &Contract::new(), &[]).unwrap_err();
    assert!(err.is_invalid_contract());
}

#[test]
fn failed_assembly_leaves_no_cache_entry() {
    let provider = ModuleProvider::new(ModelCreation::new());
    let contract = Contract::new().with("user", Descriptor::table_name("users"));

    let err = provider.provide(&base("Base"), &contract, &[]).unwrap_err();
    assert!(matches!(err, Error::DefinitionNotFound { .. }));
    assert!(provider.is_empty());
    assert!(provider.cached("Base").is_none());
}
