//! Filter evaluation: decides, per job, whether it survives the current criteria.
//!
//! AND across dimensions, OR within a dimension. Unknown facts are handled per dimension:
//!
//! | dimension  | unknown value |
//! |------------|---------------|
//! | date       | excluded      |
//! | experience | passes        |
//! | commitment | excluded      |
//! | salary     | excluded      |
//! | company    | `""`, matches no substring |
//!
//! The date/experience asymmetry is long-standing behavior that callers rely on.

use tracing::debug;

use crate::jobs::criteria::{FilterCriteria, SalaryBand};
use crate::jobs::facts::NormalizedJobFacts;
use crate::jobs::record::RawJobRecord;
use crate::jobs::salary::{range_overlaps, SalaryRange};
use crate::jobs::temporal::within_last;

const BAND_50K: f64 = 50_000.0;
const BAND_100K: f64 = 100_000.0;

/// Inclusion predicate over already-derived facts.
pub fn include(facts: &NormalizedJobFacts, criteria: &FilterCriteria, now: i64) -> bool {
    passes_date_posted(facts, criteria, now)
        && passes_experience(facts, criteria)
        && passes_commitment(facts, criteria)
        && passes_salary(facts, criteria)
        && passes_company(facts, criteria)
}

/// Derives facts for one record and tests them.
pub fn matches(record: &RawJobRecord, criteria: &FilterCriteria, now: i64) -> bool {
    include(&NormalizedJobFacts::derive(record, now), criteria, now)
}

/// Returns the surviving records, same references in the same order.
pub fn filter_jobs<'a>(
    records: &'a [RawJobRecord],
    criteria: &FilterCriteria,
    now: i64,
) -> Vec<&'a RawJobRecord> {
    if criteria.is_unconstrained() {
        return records.iter().collect();
    }

    let kept: Vec<&RawJobRecord> = records
        .iter()
        .filter(|record| matches(record, criteria, now))
        .collect();

    debug!(
        "Filter pass kept {}/{} jobs ({} active dimensions)",
        kept.len(),
        records.len(),
        criteria.active_filter_labels().len()
    );
    kept
}

/// Whether a salary range falls in a band. `100k+` is open-ended.
pub fn salary_in_band(range: &SalaryRange, band: SalaryBand) -> bool {
    match band {
        SalaryBand::UpTo50k => range_overlaps(range.min, range.max, 0.0, BAND_50K),
        SalaryBand::From50kTo100k => range_overlaps(range.min, range.max, BAND_50K, BAND_100K),
        SalaryBand::Over100k => {
            range.min.is_some_and(|v| v >= BAND_100K) || range.max.is_some_and(|v| v >= BAND_100K)
        }
    }
}

fn passes_date_posted(facts: &NormalizedJobFacts, criteria: &FilterCriteria, now: i64) -> bool {
    criteria.date_posted.is_empty()
        || criteria
            .date_posted
            .iter()
            .any(|window| within_last(facts.posted_unix, window.days(), now))
}

fn passes_experience(facts: &NormalizedJobFacts, criteria: &FilterCriteria) -> bool {
    match facts.experience {
        Some(level) => criteria.experience.is_empty() || criteria.experience.contains(&level),
        None => true,
    }
}

fn passes_commitment(facts: &NormalizedJobFacts, criteria: &FilterCriteria) -> bool {
    criteria.commitment.is_empty()
        || facts
            .employment
            .is_some_and(|kind| criteria.commitment.contains(&kind))
}

fn passes_salary(facts: &NormalizedJobFacts, criteria: &FilterCriteria) -> bool {
    if criteria.salary.is_empty() {
        return true;
    }
    if facts.salary.is_unknown() {
        return false;
    }
    criteria
        .salary
        .iter()
        .any(|band| salary_in_band(&facts.salary, *band))
}

fn passes_company(facts: &NormalizedJobFacts, criteria: &FilterCriteria) -> bool {
    if criteria.company.is_empty() {
        return true;
    }
    let company = facts.company.to_lowercase();
    criteria
        .company
        .iter()
        .any(|wanted| company.contains(&wanted.to_lowercase()))
}
