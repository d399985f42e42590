//! Integration tests for loading the dashboard configuration from disk

use dashboard::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(yaml.as_bytes()).expect("write config");
    file
}

#[test]
fn test_load_full_config_file() {
    let file = write_config(
        r#"
server:
  bind: "0.0.0.0:8080"
invoices:
  list_path: "/admin/invoices"
  amount_precision: strict
logging:
  level: "debug"
"#,
    );

    let config = DashboardConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.server.bind, "0.0.0.0:8080");
    assert_eq!(config.bind_addr().unwrap().port(), 8080);
    assert_eq!(config.invoices.list_path, "/admin/invoices");
    assert_eq!(config.invoices.amount_precision, AmountPrecision::Strict);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_empty_mapping_uses_defaults() {
    let file = write_config("{}\n");

    let config = DashboardConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.invoices.list_path, "/dashboard/invoices");
    assert_eq!(config.invoices.amount_precision, AmountPrecision::Lenient);
}

#[test]
fn test_missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");

    let err = DashboardConfig::from_yaml_file(path.to_str().unwrap()).unwrap_err();

    assert!(matches!(err, ConfigError::ReadError { .. }));
}

#[test]
fn test_malformed_file_names_the_file() {
    let file = write_config("server: [unclosed\n");
    let path = file.path().to_str().unwrap().to_string();

    let err = DashboardConfig::from_yaml_file(&path).unwrap_err();

    assert!(matches!(err, ConfigError::ParseError { file: Some(ref f), .. } if *f == path));
}

#[test]
fn test_loaded_config_drives_the_validator() {
    let file = write_config("invoices:\n  amount_precision: strict\n");
    let config = DashboardConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    let validator = InvoiceValidator::new(config.invoices.amount_precision);

    assert!(validator.validate(&InvoiceDraft::new("c1", "9.99", "paid")).is_ok());
    assert!(validator.validate(&InvoiceDraft::new("c1", "9.999", "paid")).is_err());
}
