use serde_yaml::Value;

/// A classification facet derived from `key=value` rule labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Source,
    Target,
    Domain,
    Category,
}

impl Facet {
    pub const ALL: [Facet; 4] = [Facet::Source, Facet::Target, Facet::Domain, Facet::Category];

    /// Label prefix, including the `=`, that feeds this facet
    pub fn prefix(self) -> &'static str {
        match self {
            Facet::Source => "konveyor.io/source=",
            Facet::Target => "konveyor.io/target=",
            Facet::Domain => "domain=",
            Facet::Category => "category=",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Facet values of one rule, each a `", "`-joined list in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelFacets {
    pub source: String,
    pub target: String,
    pub domain: String,
    pub category: String,
}

impl LabelFacets {
    pub fn get(&self, facet: Facet) -> &str {
        match facet {
            Facet::Source => &self.source,
            Facet::Target => &self.target,
            Facet::Domain => &self.domain,
            Facet::Category => &self.category,
        }
    }
}

/// Parse the `labels` value of a rule. Anything but a sequence yields empty
/// facets; non-string entries are ignored.
pub fn parse_labels(labels: Option<&Value>) -> LabelFacets {
    match labels {
        Some(Value::Sequence(items)) => parse_label_strs(items.iter().filter_map(Value::as_str)),
        Some(Value::Tagged(tagged)) => parse_labels(Some(&tagged.value)),
        _ => LabelFacets::default(),
    }
}

pub fn parse_label_strs<'a>(labels: impl IntoIterator<Item = &'a str>) -> LabelFacets {
    let mut values: [Vec<&str>; 4] = Default::default();

    for label in labels {
        let matched = Facet::ALL
            .iter()
            .find_map(|facet| label.strip_prefix(facet.prefix()).map(|v| (*facet, v)));
        if let Some((facet, value)) = matched {
            if !value.is_empty() {
                values[facet.index()].push(value);
            }
        }
    }

    let [source, target, domain, category] = values.map(|v| v.join(", "));
    LabelFacets {
        source,
        target,
        domain,
        category,
    }
}
