use klinevault_types::{ConflictScope, VaultConfig};

#[test]
fn vault_config_roundtrip() {
    let cfg = VaultConfig {
        parallel_granularities: true,
        conflict_scope: ConflictScope::Extended,
    };

    let json = serde_json::to_string(&cfg).expect("serialize vault config");
    let de: VaultConfig = serde_json::from_str(&json).expect("deserialize vault config");

    assert_eq!(de, cfg);
}

#[test]
fn vault_config_missing_fields_use_defaults() {
    let de: VaultConfig = serde_json::from_str("{}").expect("deserialize empty config");
    assert!(!de.parallel_granularities);
    assert_eq!(de.conflict_scope, ConflictScope::Core);

    let de: VaultConfig =
        serde_json::from_str(r#"{"parallel_granularities":true}"#).expect("partial config");
    assert!(de.parallel_granularities);
    assert_eq!(de.conflict_scope, ConflictScope::Core);
}

#[test]
fn conflict_scope_field_sets() {
    assert_eq!(ConflictScope::Core.fields().len(), 5);
    assert_eq!(ConflictScope::Extended.fields().len(), 9);
    assert_eq!(
        &ConflictScope::Extended.fields()[..5],
        ConflictScope::Core.fields()
    );
}
