//! Employment-type normalization into a fixed vocabulary.

use serde::{Deserialize, Serialize};

use crate::jobs::record::JobSignals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Temporary,
}

struct EmploymentRule {
    needles: &'static [&'static str],
    kind: EmploymentType,
    /// Whether the rule is also consulted for the `job_employment_types` array.
    in_list: bool,
}

/// Substring rules in priority order.
const EMPLOYMENT_RULES: &[EmploymentRule] = &[
    EmploymentRule {
        needles: &["full"],
        kind: EmploymentType::FullTime,
        in_list: true,
    },
    EmploymentRule {
        needles: &["part"],
        kind: EmploymentType::PartTime,
        in_list: true,
    },
    EmploymentRule {
        needles: &["contract"],
        kind: EmploymentType::Contract,
        in_list: true,
    },
    EmploymentRule {
        needles: &["intern"],
        kind: EmploymentType::Internship,
        in_list: true,
    },
    EmploymentRule {
        needles: &["temporary", "temp"],
        kind: EmploymentType::Temporary,
        in_list: false,
    },
];

impl EmploymentRule {
    fn matches(&self, text: &str) -> bool {
        self.needles.iter().any(|needle| text.contains(needle))
    }
}

/// Normalizes the employment signal, or `None` when nothing matches.
///
/// The text field is tried first. The array is only consulted when the text is absent or
/// unmatched, and each rule there passes if any element contains its needle.
pub fn normalize_employment(signals: &JobSignals) -> Option<EmploymentType> {
    let text = signals.employment_type_text.to_lowercase();
    if let Some(rule) = EMPLOYMENT_RULES.iter().find(|rule| rule.matches(&text)) {
        return Some(rule.kind);
    }

    let types: Vec<String> = signals
        .employment_types
        .iter()
        .map(|t| t.to_lowercase())
        .collect();
    EMPLOYMENT_RULES
        .iter()
        .filter(|rule| rule.in_list)
        .find(|rule| types.iter().any(|t| rule.matches(t)))
        .map(|rule| rule.kind)
}
