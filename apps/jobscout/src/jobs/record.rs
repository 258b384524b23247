//! Raw job records as the search API returns them, and the typed signal view the
//! normalizers read.
//!
//! `RawJobRecord` is never mutated: the filter hands the same values back to the caller.
//! `JobSignals` is extracted once per record; a field with an unexpected JSON type is
//! treated as absent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::jobs::fields;

/// One job object exactly as the upstream API sent it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawJobRecord(pub Map<String, Value>);

impl RawJobRecord {
    /// Wraps a JSON value if it is an object. Anything else is not a job record.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl From<Map<String, Value>> for RawJobRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Typed view of the fields the engine understands.
///
/// Alias-resolved text fields use `""` for "absent". The remaining fields are `None`
/// unless the record carries them with the expected JSON type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobSignals {
    pub title: String,
    pub company: String,
    pub employment_type_text: String,
    pub employment_types: Vec<String>,
    pub posted_timestamp: Option<f64>,
    pub posted_datetime: Option<String>,
    pub posted_human: String,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub salary_text: Option<String>,
    pub no_experience_required: bool,
    pub required_experience_months: Option<f64>,
}

impl JobSignals {
    pub fn from_record(record: &RawJobRecord) -> Self {
        let experience = record
            .get("job_required_experience")
            .and_then(Value::as_object);

        Self {
            title: fields::job_title(record),
            company: fields::company_name(record),
            employment_type_text: fields::employment_text(record),
            employment_types: string_list(record.get("job_employment_types")),
            posted_timestamp: record.get("job_posted_at_timestamp").and_then(Value::as_f64),
            posted_datetime: record
                .get("job_posted_at_datetime_utc")
                .and_then(Value::as_str)
                .map(str::to_string),
            posted_human: record
                .get("job_posted_human_readable")
                .and_then(fields::value_text)
                .unwrap_or_default(),
            min_salary: record.get("job_min_salary").and_then(Value::as_f64),
            max_salary: record.get("job_max_salary").and_then(Value::as_f64),
            salary_text: record
                .get("job_salary")
                .and_then(Value::as_str)
                .map(str::to_string),
            no_experience_required: experience
                .and_then(|r| r.get("no_experience_required"))
                .and_then(Value::as_bool)
                .unwrap_or(false),
            required_experience_months: experience
                .and_then(|r| r.get("required_experience_in_months"))
                .and_then(Value::as_f64),
        }
    }
}

/// Non-string elements become `""` so positions are kept but never match anything.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().unwrap_or_default().to_string())
            .collect(),
        _ => Vec::new(),
    }
}
