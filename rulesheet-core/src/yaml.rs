//! YAML document loading
//!
//! Rule and manifest files are read into a generic `serde_yaml::Value`. Extra
//! keys are ignored and the `when` clause is kept as an untyped tree.

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Parse YAML text into a nested value. Empty input is `Value::Null`.
pub fn parse_document(text: &str) -> std::result::Result<Value, serde_yaml::Error> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(text)
}

/// Read and parse one YAML file.
pub fn read_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_document(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// The top-level shape of a rule file.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleDocument {
    /// A single rule map
    Single(Mapping),
    /// A sequence whose map elements are rules
    Sequence(Vec<Value>),
    /// Null, a scalar, or anything else that holds no rules
    Unsupported,
}

impl From<Value> for RuleDocument {
    fn from(value: Value) -> Self {
        match untag(value) {
            Value::Mapping(map) => RuleDocument::Single(map),
            Value::Sequence(items) => RuleDocument::Sequence(items),
            _ => RuleDocument::Unsupported,
        }
    }
}

/// Strip YAML tags (`!foo`) so tagged maps and sequences read like plain ones
pub fn untag(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

/// Text of a scalar value. Strings come back verbatim; numbers and booleans
/// use their YAML spelling. Null, collections and missing values are `None`.
pub fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(Some(&tagged.value)),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// String field of a map, `""` when absent or not a scalar
pub fn string_field(map: &Mapping, key: &str) -> String {
    scalar_text(map.get(key)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_null() {
        assert_eq!(parse_document("").unwrap(), Value::Null);
        assert_eq!(parse_document("  \n").unwrap(), Value::Null);
    }

    #[test]
    fn document_shape_dispatch() {
        let single = parse_document("ruleID: a\n").unwrap();
        assert!(matches!(RuleDocument::from(single), RuleDocument::Single(_)));

        let many = parse_document("- ruleID: a\n- ruleID: b\n").unwrap();
        match RuleDocument::from(many) {
            RuleDocument::Sequence(items) => assert_eq!(items.len(), 2),
            other => panic!("expected sequence, got {other:?}"),
        }

        let scalar = parse_document("just text").unwrap();
        assert_eq!(RuleDocument::from(scalar), RuleDocument::Unsupported);
        assert_eq!(RuleDocument::from(Value::Null), RuleDocument::Unsupported);
    }

    #[test]
    fn tagged_documents_are_unwrapped() {
        let tagged = parse_document("!rules\n- ruleID: a\n").unwrap();
        assert!(matches!(RuleDocument::from(tagged), RuleDocument::Sequence(_)));
    }

    #[test]
    fn scalar_text_renders_non_strings() {
        let map: Mapping = serde_yaml::from_str("a: text\nb: 42\nc: true\nd: ~\ne: [1]\n").unwrap();
        assert_eq!(string_field(&map, "a"), "text");
        assert_eq!(string_field(&map, "b"), "42");
        assert_eq!(string_field(&map, "c"), "true");
        assert_eq!(string_field(&map, "d"), "");
        assert_eq!(string_field(&map, "e"), "");
        assert_eq!(string_field(&map, "missing"), "");
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(parse_document("key: [unclosed").is_err());
    }
}
