// Rule normalization - turns parsed rule files into flat rows
// The pieces live in:
// - extractor.rs: rule maps -> Rule records, description/message merging
// - labels.rs: key=value labels -> source/target/domain/category facets
// - when.rs: when clauses -> block-style display text

pub mod extractor;
pub mod labels;
pub mod when;

pub use extractor::{extract_rule, extract_rules, merge_description};
pub use labels::{parse_label_strs, parse_labels, Facet, LabelFacets};
pub use when::serialize_when;
