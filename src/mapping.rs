//! Helpers for nested YAML mappings
//!
//! Config documents are handled as `serde_yaml` values so that key order is
//! kept from the file all the way to the flattened output.

use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};

/// Flatten nested mappings into a single level, joining keys with `sep`.
///
/// `{a: {b: 1}, c: 2}` with `"__"` becomes `{"a__b": 1, "c": 2}`.
/// Only mappings are descended into; sequences are kept as leaf values.
pub fn flatten_mapping(mapping: &Mapping, sep: &str) -> IndexMap<String, Value> {
    let mut items = IndexMap::new();
    flatten_into(mapping, "", sep, &mut items);
    items
}

fn flatten_into(mapping: &Mapping, parent_key: &str, sep: &str, items: &mut IndexMap<String, Value>) {
    for (k, v) in mapping {
        let key = key_to_string(k);
        let new_key = if parent_key.is_empty() {
            key
        } else {
            format!("{parent_key}{sep}{key}")
        };

        match v {
            Value::Mapping(nested) => flatten_into(nested, &new_key, sep, items),
            _ => {
                items.insert(new_key, v.clone());
            }
        }
    }
}

/// Recursively flatten nested sequences.
///
/// A non-sequence value becomes a one-element list.
pub fn flatten_sequence(value: &Value) -> Vec<Value> {
    match value {
        Value::Sequence(seq) => seq.iter().flat_map(flatten_sequence).collect(),
        other => vec![other.clone()],
    }
}

/// Rewrite literal `\t` and `\n` tokens into tab and newline characters.
///
/// Descends into nested mappings only. Values are meant to be used as
/// delimiters, so anything that is not a string is left as is.
pub fn normalize_escapes(mapping: &mut Mapping) {
    for (_, v) in mapping.iter_mut() {
        match v {
            Value::Mapping(nested) => normalize_escapes(nested),
            Value::String(s) if s.contains('\\') => {
                *s = s.replace("\\t", "\t").replace("\\n", "\n");
            }
            _ => {}
        }
    }
}

/// Whether the value can be iterated over (strings, sequences and mappings).
pub fn is_iterable(value: &Value) -> bool {
    match value {
        Value::String(_) | Value::Sequence(_) | Value::Mapping(_) => true,
        Value::Tagged(tagged) => is_iterable(&tagged.value),
        _ => false,
    }
}

/// Render a mapping key as text.
pub fn key_to_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn yaml(source: &str) -> Value {
        serde_yaml::from_str(source).unwrap()
    }

    fn mapping(source: &str) -> Mapping {
        match yaml(source) {
            Value::Mapping(m) => m,
            other => panic!("expected mapping, got {other:?}"),
        }
    }

    #[test]
    fn flatten_mapping_joins_nested_keys_in_order() {
        let input = mapping(
            r#"
model:
  mesh:
    size: 2.5
  name: beam
output: result.fem
"#,
        );

        let flat = flatten_mapping(&input, "__");

        let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["model__mesh__size", "model__name", "output"]);
        assert_eq!(flat["model__mesh__size"], Value::from(2.5));
        assert_eq!(flat["output"], Value::from("result.fem"));
    }

    #[test]
    fn flatten_mapping_uses_custom_separator_and_stringifies_keys() {
        let input = mapping("1:\n  true: x\n");

        let flat = flatten_mapping(&input, ".");

        assert_eq!(flat.get("1.true"), Some(&Value::from("x")));
    }

    #[test]
    fn flatten_mapping_keeps_distinct_complex_keys_apart() {
        let input = mapping("? [a, b]\n: 1\n? [c]\n: 2\n");

        let flat = flatten_mapping(&input, "__");

        assert_eq!(flat.len(), 2);
        assert!(flat.keys().all(|key| !key.is_empty()));
    }

    #[test]
    fn flatten_mapping_keeps_sequences_as_leaves() {
        let input = mapping("list: [1, 2]\nempty: {}\n");

        let flat = flatten_mapping(&input, "__");

        assert_eq!(flat.len(), 1);
        assert!(flat["list"].is_sequence());
    }

    #[rstest]
    #[case("[1, [2, [3, 4]], 5]", vec![1, 2, 3, 4, 5])]
    #[case("[]", vec![])]
    #[case("[[], [7]]", vec![7])]
    #[case("9", vec![9])]
    fn test_flatten_sequence(#[case] source: &str, #[case] expected: Vec<i64>) {
        let expected: Vec<Value> = expected.into_iter().map(Value::from).collect();
        assert_eq!(flatten_sequence(&yaml(source)), expected);
    }

    #[test]
    fn normalize_escapes_rewrites_nested_string_values() {
        let mut input = mapping(
            r#"
tab: "\\t"
newline: "a\\nb"
both: "\\t|\\n"
plain: ","
number: 3
nested:
  inner: "\\t"
list: ["\\t"]
"#,
        );

        normalize_escapes(&mut input);

        assert_eq!(input["tab"], Value::from("\t"));
        assert_eq!(input["newline"], Value::from("a\nb"));
        assert_eq!(input["both"], Value::from("\t|\n"));
        assert_eq!(input["plain"], Value::from(","));
        assert_eq!(input["number"], Value::from(3));
        assert_eq!(input["nested"]["inner"], Value::from("\t"));
        assert_eq!(input["list"][0], Value::from("\\t"));
    }

    #[rstest]
    #[case("text", true)]
    #[case("[1, 2]", true)]
    #[case("{a: 1}", true)]
    #[case("12", false)]
    #[case("true", false)]
    #[case("~", false)]
    fn test_is_iterable(#[case] source: &str, #[case] expected: bool) {
        assert_eq!(is_iterable(&yaml(source)), expected);
    }
}
