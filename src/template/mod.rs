//! Template engine for prompt variable substitution.
//!
//! This module renders prompt templates against a caller-supplied variable
//! tree ([`serde_json::Value`]). It is used for:
//!
//! - Prompt templates (turning a named prompt configuration plus runtime
//!   variables into final model input text)
//! - Any caller-owned text that uses the same placeholder markup
//!
//! # Syntax
//!
//! - `{{name}}` / `{{a.b.c}}` - Substitutes the value resolved by walking
//!   the dotted path through the variables
//! - `{{#each arr}}...{{/each}}` - Repeats the block per array element,
//!   with `{{this}}`, `{{@index}}`, `{{@last}}` and the element's own
//!   properties in scope
//! - `{{#unless @last}}...{{/unless}}` - Recognized and stripped; the body
//!   is always emitted (see below)
//!
//! # Error Handling
//!
//! The engine is deliberately lenient: an unresolved placeholder is left as
//! literal `{{...}}` text so partially-populated variable bags still
//! produce readable prompts. The only failure mode is
//! [`TemplateError::UnterminatedBlock`] for an opening block tag with no
//! matching close.
//!
//! # Known limitation
//!
//! `{{#unless @last}}` performs no suppression: the body is emitted on
//! every iteration, last included. Per-iteration conditional context is
//! out of scope for this engine, and downstream prompts were written
//! against the always-emit behavior, so it must not change silently.

mod engine;
mod value;


// Re-export public API
pub use engine::{TemplateError, render};
pub use value::{resolve_path, value_to_string};
