//! Normalized facts: the per-record view the filter evaluates. Derived fresh on every
//! filter pass and never stored.

use serde::Serialize;

use crate::jobs::employment::{normalize_employment, EmploymentType};
use crate::jobs::experience::{classify_experience, ExperienceLevel};
use crate::jobs::record::{JobSignals, RawJobRecord};
use crate::jobs::salary::{annual_salary_range, SalaryRange};
use crate::jobs::temporal::resolve_posted;

/// `None` on any field means "unknown".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedJobFacts {
    pub posted_unix: Option<i64>,
    pub salary: SalaryRange,
    pub experience: Option<ExperienceLevel>,
    pub employment: Option<EmploymentType>,
    pub company: String,
}

impl NormalizedJobFacts {
    pub fn derive(record: &RawJobRecord, now: i64) -> Self {
        Self::from_signals(&JobSignals::from_record(record), now)
    }

    pub fn from_signals(signals: &JobSignals, now: i64) -> Self {
        Self {
            posted_unix: resolve_posted(signals, now),
            salary: annual_salary_range(signals),
            experience: classify_experience(signals),
            employment: normalize_employment(signals),
            company: signals.company.clone(),
        }
    }
}
