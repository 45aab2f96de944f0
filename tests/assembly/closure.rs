//! Dependency closure as seen through the provider

use crate::common::*;

fn provider_with(graph: &[(&str, &[&str])]) -> ModuleProvider {
    let mut creation = ModelCreation::new();
    for (name, depends) in graph {
        creation.register(name, depends, define_from_attrs).unwrap();
    }
    ModuleProvider::new(creation)
}

#[test]
fn prerequisite_comes_first() {
    let provider = provider_with(&[("a", &["b"][..]), ("b", &[][..])]);
    assert_eq!(provider.needs(["a"]).unwrap(), vec!["b", "a"]);
}

#[test]
fn independent_names_keep_request_order() {
    let provider = provider_with(&[("a", &[][..]), ("b", &[][..])]);
    assert_eq!(provider.needs(["a", "b"]).unwrap(), vec!["a", "b"]);
}

#[test]
fn repeated_names_are_not_duplicated() {
    let provider = provider_with(&[("a", &["b"][..]), ("b", &[][..])]);
    assert_eq!(provider.needs(["b", "a", "b"]).unwrap(), vec!["b", "a"]);
}

#[test]
fn blog_closure() {
    let provider = ModuleProvider::new(blog_creation(AssemblyConfig::default()));
    assert_eq!(
        provider.needs(["user_group", "post"]).unwrap(),
        vec!["user", "group", "user_group", "post"]
    );
}

#[test]
fn cycle_is_rejected_during_validation() {
    let provider = provider_with(&[("a", &["b"][..]), ("b", &["a"][..])]);
    let contract = Contract::new()
        .with("a", Descriptor::table_name("a"))
        .with("b", Descriptor::table_name("b"));

    let err = provider.verify_contract(&contract).unwrap_err();
    assert!(err.is_invalid_definition());
    match err {
        Error::CyclicDependency { path } => {
            assert_eq!(path.first(), path.last());
            assert_eq!(path.len(), 3);
        }
        other => panic!("expected cycle, got {:?}", other),
    }

    assert!(provider.provide(&base("Base"), &contract, &[]).is_err());
    assert!(provider.is_empty());
}
