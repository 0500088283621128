use super::*;

#[test]
fn test_default_prefix() {
    let config = StoreConfig::default();
    assert_eq!(config.prefix, "_df_meta_");
}

#[test]
fn test_with_prefix() {
    let config = StoreConfig::with_prefix("myapp_").unwrap();
    assert_eq!(config.prefix, "myapp_");
}

#[test]
fn test_rejects_empty_prefix() {
    assert!(StoreConfig::with_prefix("").is_err());
}

#[test]
fn test_rejects_non_identifier_prefix() {
    assert!(StoreConfig::with_prefix("bad`prefix").is_err());
    assert!(StoreConfig::with_prefix("no spaces").is_err());
}
