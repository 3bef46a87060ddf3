//! The render passes.
//!
//! Rendering is a fixed sequence of text-rewrite passes over the template:
//!
//! 1. scalar substitution (`{{name}}`, `{{a.b.c}}`),
//! 2. loop expansion (`{{#each arr}}...{{/each}}`),
//! 3. conditional stripping (`{{#unless ...}}...{{/unless}}`).
//!
//! The ordering is part of the engine's contract: a top-level variable
//! whose name matches a loop element property is substituted before the
//! loop runs. Downstream prompt documents depend on it.

use std::sync::LazyLock;

use regex::{Captures, NoExpand, Regex};
use serde_json::Value;
use thiserror::Error;

use super::value::{resolve_path, value_to_string};

/// Error type for template rendering failures.
///
/// Rendering is lenient about content (unresolved placeholders stay
/// literal) but strict about structure: an opening block tag without a
/// matching close aborts the render.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// An opening `{{#each}}` or `{{#unless}}` has no matching close tag.
    #[error("unterminated '{{{{{tag}}}}}' block at byte {position} in template")]
    UnterminatedBlock {
        /// The block tag, e.g. `#each`.
        tag: String,
        /// Byte offset of the opening tag. Measured against the text the
        /// failing pass saw, so earlier substitutions can shift it from
        /// the original template's offset.
        position: usize,
    },
}

static VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z0-9_]+)*)\s*\}\}")
        .expect("variable regex is valid")
});

static EACH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{#each\s+([A-Za-z_][A-Za-z0-9_.]*)\s*\}\}(.*?)\{\{/each\}\}")
        .expect("each-block regex is valid")
});

static EACH_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{#each\b").expect("each-open regex is valid"));

static UNLESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{#unless\s+([^}]*?)\s*\}\}(.*?)\{\{/unless\}\}")
        .expect("unless-block regex is valid")
});

static UNLESS_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{#unless\b").expect("unless-open regex is valid"));

static THIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*this\s*\}\}").expect("this regex is valid"));

static INDEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*@index\s*\}\}").expect("index regex is valid"));

static LAST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*@last\s*\}\}").expect("last regex is valid"));

/// Render a template string against a variable tree.
///
/// # Arguments
///
/// * `template` - Template text with `{{...}}` placeholder markup
/// * `variables` - Nested map/array/scalar tree supplied per render call
///
/// # Returns
///
/// * `Ok(String)` - Rendered text; unresolved placeholders remain literal
/// * `Err(TemplateError)` - A block tag was left unterminated
///
/// # Examples
///
/// ```
/// use promptpipe::template::render;
/// use serde_json::json;
///
/// let vars = json!({"dish": "udon", "user": {"skill": "beginner"}});
/// let out = render("Cook {{dish}} for a {{user.skill}}.", &vars).unwrap();
/// assert_eq!(out, "Cook udon for a beginner.");
/// ```
///
/// Unset variables are not an error:
///
/// ```
/// use promptpipe::template::render;
/// use serde_json::json;
///
/// let out = render("Hello {{missing}}", &json!({})).unwrap();
/// assert_eq!(out, "Hello {{missing}}");
/// ```
pub fn render(template: &str, variables: &Value) -> Result<String, TemplateError> {
    let substituted = substitute_variables(template, variables);
    let expanded = expand_loops(&substituted, variables)?;
    strip_unless_blocks(&expanded)
}

/// Pass 1: scalar substitution with lenient fallback.
///
/// Also reused per loop iteration to expose an object element's own
/// properties inside the block.
fn substitute_variables(input: &str, variables: &Value) -> String {
    VAR_RE
        .replace_all(input, |caps: &Captures<'_>| {
            match resolve_path(variables, &caps[1]) {
                Some(value) => value_to_string(value),
                // Unresolved: keep the placeholder literal.
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Pass 2: `{{#each}}` loop expansion.
///
/// A block whose target does not resolve to an array is left literal; a
/// block with no close tag is an error.
fn expand_loops(input: &str, variables: &Value) -> Result<String, TemplateError> {
    check_blocks_terminated(input, &EACH_OPEN_RE, &EACH_RE, "#each")?;

    let expanded = EACH_RE.replace_all(input, |caps: &Captures<'_>| {
        let Some(Value::Array(items)) = resolve_path(variables, &caps[1]) else {
            return caps[0].to_string();
        };
        let body = &caps[2];
        let mut out = String::new();
        for (index, item) in items.iter().enumerate() {
            out.push_str(&expand_iteration(body, item, index, index + 1 == items.len()));
        }
        out
    });

    Ok(expanded.into_owned())
}

/// Expand one loop iteration: `{{this}}`, `{{@index}}`, `{{@last}}`, then
/// the element's own properties when the element is an object.
fn expand_iteration(body: &str, item: &Value, index: usize, is_last: bool) -> String {
    let this_text = value_to_string(item);
    let expanded = THIS_RE.replace_all(body, NoExpand(&this_text));

    let index_text = index.to_string();
    let expanded = INDEX_RE.replace_all(&expanded, NoExpand(&index_text));

    let last_text = if is_last { "true" } else { "false" };
    let expanded = LAST_RE.replace_all(&expanded, NoExpand(last_text));

    if item.is_object() {
        substitute_variables(&expanded, item)
    } else {
        expanded.into_owned()
    }
}

/// Pass 3: strip `{{#unless}}` markers.
///
/// The body is always emitted; there is no per-iteration suppression (see
/// the module docs). Unterminated blocks are still structural errors.
fn strip_unless_blocks(input: &str) -> Result<String, TemplateError> {
    check_blocks_terminated(input, &UNLESS_OPEN_RE, &UNLESS_RE, "#unless")?;
    Ok(UNLESS_RE.replace_all(input, "$2").into_owned())
}

/// Every opening tag must fall inside some complete block match. An opener
/// outside all matches has no close tag.
fn check_blocks_terminated(
    input: &str,
    open_re: &Regex,
    block_re: &Regex,
    tag: &str,
) -> Result<(), TemplateError> {
    let spans: Vec<(usize, usize)> = block_re
        .find_iter(input)
        .map(|m| (m.start(), m.end()))
        .collect();

    for open in open_re.find_iter(input) {
        let inside = spans
            .iter()
            .any(|&(start, end)| open.start() >= start && open.start() < end);
        if !inside {
            return Err(TemplateError::UnterminatedBlock {
                tag: tag.to_string(),
                position: open.start(),
            });
        }
    }

    Ok(())
}
