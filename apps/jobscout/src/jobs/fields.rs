//! Field normalization: resolves one canonical value from the alias keys that different
//! API response variants use for the same fact.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::jobs::record::RawJobRecord;

pub const COMPANY_ALIASES: &[&str] = &["employer_name", "company_name", "job_publisher", "publisher"];
pub const TITLE_ALIASES: &[&str] = &["job_title", "job_job_title"];
pub const EMPLOYMENT_TEXT_ALIASES: &[&str] = &["job_employment_type_text", "job_employment_type"];
pub const LOCATION_ALIASES: &[&str] = &["job_location", "location"];
const LOCATION_PARTS: &[&str] = &["job_city", "job_state", "job_country"];

/// Upper bound on a dropdown's size.
pub const MAX_OPTIONS: usize = 50;

/// Renders a JSON value as display text.
///
/// Non-empty strings and numbers are used as-is; string arrays are joined with `,`.
/// Everything else (null, bool, object, empty string) counts as absent.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(","))
        }
        _ => None,
    }
}

/// Returns the first alias that carries usable text, or `""` when none does.
pub fn resolve_alias(record: &RawJobRecord, aliases: &[&str]) -> String {
    aliases
        .iter()
        .find_map(|key| record.get(key).and_then(value_text))
        .unwrap_or_default()
}

pub fn company_name(record: &RawJobRecord) -> String {
    resolve_alias(record, COMPANY_ALIASES)
}

pub fn job_title(record: &RawJobRecord) -> String {
    resolve_alias(record, TITLE_ALIASES)
}

pub fn employment_text(record: &RawJobRecord) -> String {
    resolve_alias(record, EMPLOYMENT_TEXT_ALIASES)
}

/// A single location string; falls back to joining city, state and country.
pub fn location(record: &RawJobRecord) -> String {
    let direct = resolve_alias(record, LOCATION_ALIASES);
    if !direct.is_empty() {
        return direct;
    }
    LOCATION_PARTS
        .iter()
        .filter_map(|key| record.get(key).and_then(value_text))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Distinct, sorted company names for the company filter dropdown.
pub fn company_options(records: &[RawJobRecord]) -> Vec<String> {
    distinct_options(records, company_name)
}

/// Distinct, sorted locations for the location picker.
pub fn location_options(records: &[RawJobRecord]) -> Vec<String> {
    distinct_options(records, location)
}

fn distinct_options(records: &[RawJobRecord], resolve: fn(&RawJobRecord) -> String) -> Vec<String> {
    records
        .iter()
        .map(resolve)
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .take(MAX_OPTIONS)
        .collect()
}
