//! PromptConfig struct definition and validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One named, versioned prompt definition.
///
/// All five fields are required and must be non-empty; a document missing
/// any of them is rejected at load time with an error naming the field.
/// The `schema` is opaque to the processor and passed through to whatever
/// sends the prompt upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Semantic version tag of the prompt document.
    pub version: String,

    /// Human-readable purpose of the prompt.
    pub description: String,

    /// Model settings forwarded to the provider.
    pub model_config: ModelConfig,

    /// Template text with `{{...}}` placeholder markup.
    pub template: String,

    /// Expected structured-output shape. Opaque; passed through unmodified.
    pub schema: Value,
}

/// Provider model settings. Unknown provider-specific keys are preserved
/// in `extra` rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier, e.g. `gpt-4o-mini`.
    pub model: String,

    /// Sampling temperature.
    pub temperature: f64,

    /// Completion token budget.
    pub max_tokens: u32,

    /// Additional provider-specific keys, passed through as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PromptConfig {
    /// Validate field contents beyond what deserialization enforces.
    ///
    /// Deserialization already rejects missing fields (naming them);
    /// this checks the non-empty rules.
    pub fn validate(&self) -> Result<(), String> {
        if self.version.trim().is_empty() {
            return Err("field 'version' must be non-empty".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("field 'description' must be non-empty".to_string());
        }
        if self.model_config.model.trim().is_empty() {
            return Err("field 'model_config.model' must be non-empty".to_string());
        }
        if self.template.trim().is_empty() {
            return Err("field 'template' must be non-empty".to_string());
        }
        if schema_is_empty(&self.schema) {
            return Err("field 'schema' must be non-empty".to_string());
        }
        Ok(())
    }
}

fn schema_is_empty(schema: &Value) -> bool {
    match schema {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
