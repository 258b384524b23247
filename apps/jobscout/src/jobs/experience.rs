//! Experience classification: structured hints first, then title heuristics.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::jobs::record::JobSignals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
}

const ENTRY_MAX_MONTHS: f64 = 24.0;
const MID_MAX_MONTHS: f64 = 84.0;

/// Title heuristics in priority order. Matched case-insensitively on word boundaries.
const TITLE_HEURISTICS: &[(&str, ExperienceLevel)] = &[
    (r"\b(intern|junior|jr|entry)\b", ExperienceLevel::Entry),
    (r"\b(principal|staff|lead|sr|senior)\b", ExperienceLevel::Senior),
];

static TITLE_PATTERNS: Lazy<Vec<(Regex, ExperienceLevel)>> = Lazy::new(|| {
    TITLE_HEURISTICS
        .iter()
        .map(|&(pattern, level)| {
            let regex = Regex::new(&format!("(?i){pattern}"))
                .expect("title heuristic pattern must compile");
            (regex, level)
        })
        .collect()
});

/// Infers the experience bucket, or `None` when the record gives nothing to go on.
///
/// 1. `no_experience_required` → entry
/// 2. required months: < 24 entry, < 84 mid, else senior
/// 3. title heuristics
/// 4. any other non-empty title → mid
pub fn classify_experience(signals: &JobSignals) -> Option<ExperienceLevel> {
    if signals.no_experience_required {
        return Some(ExperienceLevel::Entry);
    }
    if let Some(months) = signals.required_experience_months {
        return Some(level_for_months(months));
    }
    if signals.title.is_empty() {
        return None;
    }
    classify_title(&signals.title).or(Some(ExperienceLevel::Mid))
}

/// Applies only the title heuristics table.
pub fn classify_title(title: &str) -> Option<ExperienceLevel> {
    TITLE_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(title))
        .map(|(_, level)| *level)
}

fn level_for_months(months: f64) -> ExperienceLevel {
    if months < ENTRY_MAX_MONTHS {
        ExperienceLevel::Entry
    } else if months < MID_MAX_MONTHS {
        ExperienceLevel::Mid
    } else {
        ExperienceLevel::Senior
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months(m: f64) -> JobSignals {
        JobSignals {
            required_experience_months: Some(m),
            ..Default::default()
        }
    }

    fn title(t: &str) -> JobSignals {
        JobSignals {
            title: t.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_months_thresholds() {
        assert_eq!(classify_experience(&months(10.0)), Some(ExperienceLevel::Entry));
        assert_eq!(classify_experience(&months(23.9)), Some(ExperienceLevel::Entry));
        assert_eq!(classify_experience(&months(24.0)), Some(ExperienceLevel::Mid));
        assert_eq!(classify_experience(&months(83.0)), Some(ExperienceLevel::Mid));
        assert_eq!(classify_experience(&months(84.0)), Some(ExperienceLevel::Senior));
        assert_eq!(classify_experience(&months(90.0)), Some(ExperienceLevel::Senior));
    }

    #[test]
    fn test_no_experience_flag_beats_months_and_title() {
        let s = JobSignals {
            no_experience_required: true,
            required_experience_months: Some(120.0),
            title: "Principal Engineer".to_string(),
            ..Default::default()
        };
        assert_eq!(classify_experience(&s), Some(ExperienceLevel::Entry));
    }

    #[test]
    fn test_months_beat_title() {
        let s = JobSignals {
            required_experience_months: Some(36.0),
            title: "Senior Engineer".to_string(),
            ..Default::default()
        };
        assert_eq!(classify_experience(&s), Some(ExperienceLevel::Mid));
    }

    #[test]
    fn test_title_heuristics() {
        assert_eq!(
            classify_experience(&title("Senior Backend Engineer")),
            Some(ExperienceLevel::Senior)
        );
        assert_eq!(classify_experience(&title("Sr. Data Analyst")), Some(ExperienceLevel::Senior));
        assert_eq!(classify_experience(&title("Staff SRE")), Some(ExperienceLevel::Senior));
        assert_eq!(classify_experience(&title("Software Intern")), Some(ExperienceLevel::Entry));
        assert_eq!(classify_experience(&title("JUNIOR Developer")), Some(ExperienceLevel::Entry));
        assert_eq!(classify_experience(&title("Entry-Level Analyst")), Some(ExperienceLevel::Entry));
    }

    #[test]
    fn test_entry_patterns_checked_before_senior() {
        assert_eq!(classify_title("Junior Lead Developer"), Some(ExperienceLevel::Entry));
        assert_eq!(classify_title("Senior Intern Coordinator"), Some(ExperienceLevel::Entry));
    }

    #[test]
    fn test_heuristics_require_word_boundaries() {
        // "internal", "leader" and "staffing" are not seniority words.
        assert_eq!(classify_title("Internal Tools Engineer"), None);
        assert_eq!(classify_title("Team Leadership Coach"), None);
        assert_eq!(classify_title("Staffing Coordinator"), None);
    }

    #[test]
    fn test_unmatched_title_defaults_to_mid() {
        assert_eq!(classify_experience(&title("Backend Engineer")), Some(ExperienceLevel::Mid));
        assert_eq!(
            classify_experience(&title("Internal Tools Engineer")),
            Some(ExperienceLevel::Mid)
        );
    }

    #[test]
    fn test_nothing_to_go_on_is_unknown() {
        assert_eq!(classify_experience(&JobSignals::default()), None);
    }
}
