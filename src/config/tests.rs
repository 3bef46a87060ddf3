//! Tests for prompt config parsing, validation, and the filesystem source.

use crate::config::{ConfigSource, FsConfigSource, PromptConfig, SourceError};
use serde_json::json;

const VALID_DOC: &str = r#"
version: "1.2.0"
description: "Generates the next recipe wizard step"
model_config:
  model: gpt-4o-mini
  temperature: 0.7
  max_tokens: 2048
  top_p: 0.9
template: "Suggest a {{cuisine}} dish."
schema:
  type: object
  properties:
    dish: { type: string }
"#;

fn parse(doc: &str) -> Result<PromptConfig, serde_yaml::Error> {
    serde_yaml::from_str(doc)
}

#[test]
fn valid_document_parses_and_validates() {
    let config = parse(VALID_DOC).unwrap();
    assert_eq!(config.version, "1.2.0");
    assert_eq!(config.model_config.model, "gpt-4o-mini");
    assert_eq!(config.model_config.temperature, 0.7);
    assert_eq!(config.model_config.max_tokens, 2048);
    assert_eq!(config.template, "Suggest a {{cuisine}} dish.");
    assert!(config.validate().is_ok());
}

#[test]
fn provider_specific_keys_are_preserved() {
    let config = parse(VALID_DOC).unwrap();
    assert_eq!(config.model_config.extra.get("top_p"), Some(&json!(0.9)));
}

#[test]
fn schema_passes_through_opaquely() {
    let config = parse(VALID_DOC).unwrap();
    assert_eq!(config.schema["type"], json!("object"));
    assert_eq!(config.schema["properties"]["dish"]["type"], json!("string"));
}

#[test]
fn missing_fields_are_named_in_the_parse_error() {
    for field in ["version", "description", "model_config", "template", "schema"] {
        let full = json!({
            "version": "1.0.0",
            "description": "d",
            "model_config": {"model": "m", "temperature": 0.1, "max_tokens": 10},
            "template": "t {{x}}",
            "schema": {"type": "object"},
        });
        let mut trimmed = full.as_object().unwrap().clone();
        trimmed.remove(field);
        let yaml = serde_yaml::to_string(&trimmed).unwrap();
        let err = parse(&yaml).unwrap_err().to_string();
        assert!(
            err.contains(field),
            "error for missing '{field}' should name it, got: {err}"
        );
    }
}

#[test]
fn missing_model_config_fields_are_named() {
    for field in ["model", "temperature", "max_tokens"] {
        let full = json!({"model": "m", "temperature": 0.1, "max_tokens": 10});
        let mut trimmed = full.as_object().unwrap().clone();
        trimmed.remove(field);
        let doc = json!({
            "version": "1.0.0",
            "description": "d",
            "model_config": trimmed,
            "template": "t",
            "schema": {"type": "object"},
        });
        let yaml = serde_yaml::to_string(&doc).unwrap();
        let err = parse(&yaml).unwrap_err().to_string();
        assert!(
            err.contains(field),
            "error for missing '{field}' should name it, got: {err}"
        );
    }
}

#[test]
fn empty_fields_fail_validation_by_name() {
    let cases = [
        ("version", json!("")),
        ("description", json!("  ")),
        ("template", json!("")),
        ("schema", json!({})),
    ];
    for (field, empty) in cases {
        let mut doc = json!({
            "version": "1.0.0",
            "description": "d",
            "model_config": {"model": "m", "temperature": 0.1, "max_tokens": 10},
            "template": "t",
            "schema": {"type": "object"},
        });
        doc[field] = empty;
        let config: PromptConfig = serde_json::from_value(doc).unwrap();
        let reason = config.validate().unwrap_err();
        assert!(
            reason.contains(field),
            "validation error for empty '{field}' should name it, got: {reason}"
        );
    }
}

#[test]
fn empty_model_identifier_fails_validation() {
    let doc = json!({
        "version": "1.0.0",
        "description": "d",
        "model_config": {"model": "", "temperature": 0.1, "max_tokens": 10},
        "template": "t",
        "schema": {"type": "object"},
    });
    let config: PromptConfig = serde_json::from_value(doc).unwrap();
    let reason = config.validate().unwrap_err();
    assert!(reason.contains("model_config.model"));
}

// ---------------------------------------------------------------------------
// Filesystem source
// ---------------------------------------------------------------------------

#[test]
fn fs_source_reads_named_document() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("wizard_step.yaml"), VALID_DOC).unwrap();

    let source = FsConfigSource::new(dir.path());
    let text = source.read("wizard_step").unwrap();
    assert_eq!(text, VALID_DOC);
}

#[test]
fn fs_source_reports_missing_document() {
    let dir = tempfile::tempdir().unwrap();
    let source = FsConfigSource::new(dir.path());
    assert!(matches!(
        source.read("nope").unwrap_err(),
        SourceError::NotFound
    ));
}

#[test]
fn fs_source_lists_yaml_stems_sorted() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b_step.yaml"), "x: 1").unwrap();
    std::fs::write(dir.path().join("a_step.yaml"), "x: 1").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let source = FsConfigSource::new(dir.path());
    assert_eq!(source.list().unwrap(), vec!["a_step", "b_step"]);
}

#[test]
fn fs_source_list_fails_on_missing_directory() {
    let source = FsConfigSource::new("/nonexistent/prompt/dir");
    assert!(matches!(source.list().unwrap_err(), SourceError::Io(_)));
}
