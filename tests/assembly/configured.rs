//! Assembly driven by TOML config and TOML contracts

use crate::common::*;

#[test]
fn config_sets_module_name() {
    let config = AssemblyConfig::from_toml_str("module_name = \"blog\"\n").unwrap();
    let provider = ModuleProvider::new(blog_creation(config));
    let ns = provider.provide(&base("Base"), &blog_contract(), &[]).unwrap();

    assert_eq!(ns.module_name(), "blog");
    assert!(ns.qualified_name().starts_with("blog#"));
}

#[test]
fn strict_config_rejects_duplicate_definitions() {
    let config = AssemblyConfig::from_toml_str("strict = true").unwrap();
    let mut creation = ModelCreation::with_config(config);
    creation.register("user", &[], define_from_attrs).unwrap();

    let err = creation.register("user", &[], define_from_attrs).unwrap_err();
    assert!(matches!(err, Error::DefinitionNameConflict { ref name } if name == "user"));
    assert!(err.is_invalid_definition());
}

#[test]
fn default_config_overwrites_duplicate_definitions() {
    let mut creation = ModelCreation::new();
    creation.register("user", &["group"], define_from_attrs).unwrap();
    creation.register("user", &[], define_from_attrs).unwrap();

    assert_eq!(creation.registry().len(), 1);
    assert_eq!(creation.needs(["user"]).unwrap(), vec!["user"]);
}

#[test]
fn contract_order_builds_dependents_before_prerequisites() {
    let config = AssemblyConfig::from_toml_str("order = \"contract\"").unwrap();
    let provider = ModuleProvider::new(blog_creation(config));

    // blog_contract lists user_group before user and group
    let err = provider.provide(&base("Base"), &blog_contract(), &[]).unwrap_err();
    assert!(matches!(err, Error::InvalidDefinition(_)));
    assert!(provider.is_empty());
}

#[test]
fn toml_contract_assembles() {
    let contract = Contract::from_toml_str(
        r#"
[user]
table_name = "users"
model_name = "User"

[group]
table = { name = "groups", schema = "auth" }
model_name = "Group"

[user_group]
table_name = "user_groups"
"#,
    )
    .unwrap();

    let provider = ModuleProvider::new(blog_creation(AssemblyConfig::default()));
    let ns = provider.provide(&base("Base"), &contract, &[]).unwrap();

    assert_eq!(ns.len(), 3);
    assert_eq!(ns.get("User").unwrap().table_name(), "users");
    let group = ns.get("Group").unwrap();
    assert_eq!(group.table().unwrap().qualified_name(), "auth.groups");
    assert!(ns.contains("user_group"));
}
