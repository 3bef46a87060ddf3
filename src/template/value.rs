//! Dotted-path resolution and stringification over a JSON value tree.
//!
//! Variables are an arbitrarily nested map/array/scalar union. Lookup is an
//! explicit recursive descent rather than anything reflection-shaped, so
//! behavior is identical for every caller-supplied shape.

use serde_json::Value;

/// Fields tried, in order, when rendering an object inside a bulleted list.
/// The localized name wins over the plain one; wizard payloads also carry
/// `title`/`label` on some item kinds.
const NAME_FIELDS: &[&str] = &["name_localized", "name", "title", "label"];

/// Fields tried, in order, for the item's explanatory text.
const EXPLANATION_FIELDS: &[&str] = &["explanation", "description"];

/// Resolve a dotted path (`a.b.c`) against a value tree.
///
/// Object segments index by key; array segments accept a numeric index
/// (`items.0.name`). Returns `None` as soon as any segment fails to
/// resolve - callers decide whether that is an error (it never is during
/// rendering, where unresolved placeholders stay literal).
pub fn resolve_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Render a value as substitution text.
///
/// - Scalars use their natural string form; `null` renders empty.
/// - Objects render as `key: value` pairs joined by `, `, in document
///   order.
/// - Arrays render as a `- ` bulleted list, one element per line. Object
///   elements use a prioritized name/explanation field search (see
///   [`NAME_FIELDS`]) and fall back to compact JSON.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .iter()
            .map(|(key, val)| format!("{}: {}", key, value_to_string(val)))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Array(items) => items
            .iter()
            .map(|item| format!("- {}", list_item_to_string(item)))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Render one array element for a bulleted list.
fn list_item_to_string(item: &Value) -> String {
    let Value::Object(map) = item else {
        return value_to_string(item);
    };

    let name = NAME_FIELDS
        .iter()
        .find_map(|field| map.get(*field))
        .map(value_to_string);
    let explanation = EXPLANATION_FIELDS
        .iter()
        .find_map(|field| map.get(*field))
        .map(value_to_string);

    match (name, explanation) {
        (Some(name), Some(explanation)) => format!("{name}: {explanation}"),
        (Some(name), None) => name,
        (None, Some(explanation)) => explanation,
        // No recognizable fields: the item's raw string form.
        (None, None) => serde_json::to_string(item).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_nested_object_path() {
        let root = json!({"user": {"profile": {"name": "Alice"}}});
        assert_eq!(
            resolve_path(&root, "user.profile.name"),
            Some(&json!("Alice"))
        );
    }

    #[test]
    fn resolves_numeric_array_index() {
        let root = json!({"items": [{"name": "first"}, {"name": "second"}]});
        assert_eq!(resolve_path(&root, "items.1.name"), Some(&json!("second")));
    }

    #[test]
    fn missing_segment_resolves_to_none() {
        let root = json!({"a": {"b": 1}});
        assert_eq!(resolve_path(&root, "a.c"), None);
        assert_eq!(resolve_path(&root, "a.b.c"), None);
    }

    #[test]
    fn non_numeric_index_into_array_resolves_to_none() {
        let root = json!({"items": ["x"]});
        assert_eq!(resolve_path(&root, "items.first"), None);
    }

    #[test]
    fn scalars_render_naturally() {
        assert_eq!(value_to_string(&json!("text")), "text");
        assert_eq!(value_to_string(&json!(42)), "42");
        assert_eq!(value_to_string(&json!(1.5)), "1.5");
        assert_eq!(value_to_string(&json!(true)), "true");
        assert_eq!(value_to_string(&json!(null)), "");
    }

    #[test]
    fn objects_render_as_key_value_pairs() {
        let value = json!({"cuisine": "japanese", "servings": 2});
        assert_eq!(value_to_string(&value), "cuisine: japanese, servings: 2");
    }

    #[test]
    fn scalar_arrays_render_as_bullets() {
        let value = json!(["miso", "tofu"]);
        assert_eq!(value_to_string(&value), "- miso\n- tofu");
    }

    #[test]
    fn object_array_items_use_name_and_explanation() {
        let value = json!([
            {"name": "sear", "explanation": "high heat, short time"},
            {"name_localized": "ラーメン", "name": "ramen", "description": "noodle soup"},
        ]);
        assert_eq!(
            value_to_string(&value),
            "- sear: high heat, short time\n- ラーメン: noodle soup"
        );
    }

    #[test]
    fn object_array_item_without_known_fields_falls_back_to_json() {
        let value = json!([{"grams": 200}]);
        assert_eq!(value_to_string(&value), r#"- {"grams":200}"#);
    }

    #[test]
    fn object_array_item_with_only_name_renders_name() {
        let value = json!([{"name": "rest the dough"}]);
        assert_eq!(value_to_string(&value), "- rest the dough");
    }
}
