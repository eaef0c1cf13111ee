// Data source domain model and threshold rule evaluation
use serde::{Deserialize, Serialize};

/// Fill color when no rule matches (slate gray).
pub const DEFAULT_POLYGON_COLOR: &str = "#94a3b8";

/// Provider field queried when a data source does not name one.
pub const DEFAULT_FIELD: &str = "temperature_2m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleOperator {
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">=")]
    GreaterOrEqual,
}

impl RuleOperator {
    fn test(self, value: f64, threshold: f64) -> bool {
        match self {
            // Exact comparison; the rule format carries no epsilon.
            RuleOperator::Equal => value == threshold,
            RuleOperator::Less => value < threshold,
            RuleOperator::Greater => value > threshold,
            RuleOperator::LessOrEqual => value <= threshold,
            RuleOperator::GreaterOrEqual => value >= threshold,
        }
    }
}

/// One threshold-to-color mapping inside a data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRule {
    pub operator: RuleOperator,
    pub threshold: f64,
    pub color: String,
    pub label: String,
}

/// A named external metric plus its display classification rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub id: String,
    pub name: String,
    /// Provider field key, e.g. "temperature_2m".
    pub field: String,
    pub rules: Vec<ColorRule>,
}

/// Map a value to a display color through a rule set.
///
/// Rules are evaluated in ascending threshold order regardless of their
/// order in the list; the first satisfied rule wins. Among equal thresholds
/// the sort is stable, so insertion order decides.
pub fn classify(value: f64, rules: &[ColorRule]) -> String {
    let mut sorted: Vec<&ColorRule> = rules.iter().collect();
    sorted.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));

    for rule in sorted {
        if rule.operator.test(value, rule.threshold) {
            return rule.color.clone();
        }
    }

    DEFAULT_POLYGON_COLOR.to_string()
}
