use super::labels::parse_labels;
use super::when::serialize_when;
use crate::types::Rule;
use crate::yaml::{string_field, untag, RuleDocument};
use serde_yaml::{Mapping, Value};

/// Extract every rule in a parsed rule file, in document order.
///
/// Sequence elements that are not maps are skipped.
pub fn extract_rules(document: RuleDocument) -> Vec<Rule> {
    match document {
        RuleDocument::Single(map) => vec![extract_rule(&map)],
        RuleDocument::Sequence(items) => items
            .into_iter()
            .filter_map(|item| match untag(item) {
                Value::Mapping(map) => Some(extract_rule(&map)),
                other => {
                    tracing::debug!("Skipping non-map rule entry: {other:?}");
                    None
                }
            })
            .collect(),
        RuleDocument::Unsupported => Vec::new(),
    }
}

/// Build one rule record from a rule map. Missing keys become empty strings.
pub fn extract_rule(map: &Mapping) -> Rule {
    let facets = parse_labels(map.get("labels"));
    Rule {
        rule_id: string_field(map, "ruleID"),
        when: serialize_when(map.get("when")),
        merged_description: merge_description(
            &string_field(map, "description"),
            &string_field(map, "message"),
        ),
        source: facets.source,
        target: facets.target,
        domain: facets.domain,
        category: facets.category,
    }
}

/// Trim both parts; join with a newline when both are present.
pub fn merge_description(description: &str, message: &str) -> String {
    let description = description.trim();
    let message = message.trim();
    match (description.is_empty(), message.is_empty()) {
        (false, false) => format!("{description}\n{message}"),
        (false, true) => description.to_string(),
        (true, false) => message.to_string(),
        (true, true) => String::new(),
    }
}
