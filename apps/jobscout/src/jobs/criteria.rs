//! Filter criteria: an immutable value with one set of accepted values per dimension.
//!
//! An empty set leaves its dimension unconstrained. A single-select UI produces one-element
//! sets; the multi-select modal produces comma-joined labels that become larger sets
//! (OR within a dimension, AND across dimensions).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::jobs::employment::EmploymentType;
use crate::jobs::experience::ExperienceLevel;

/// Labels that mean "no constraint" in any dimension.
const SENTINELS: &[&str] = &["any", "any time", "all", "no companies"];

/// A closed set of options, each with a canonical slug and the UI label.
pub trait FilterOption: Copy + Ord + 'static {
    const ALL: &'static [Self];

    fn slug(self) -> &'static str;

    fn label(self) -> &'static str;

    /// Matches either the slug or the UI label, ignoring case and surrounding space.
    fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|o| o.slug().eq_ignore_ascii_case(raw) || o.label().eq_ignore_ascii_case(raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DateWindow {
    #[serde(rename = "1d")]
    LastDay,
    #[serde(rename = "3d")]
    LastThreeDays,
    #[serde(rename = "7d")]
    LastWeek,
    #[serde(rename = "30d")]
    LastMonth,
}

impl DateWindow {
    pub fn days(self) -> i64 {
        match self {
            DateWindow::LastDay => 1,
            DateWindow::LastThreeDays => 3,
            DateWindow::LastWeek => 7,
            DateWindow::LastMonth => 30,
        }
    }
}

impl FilterOption for DateWindow {
    const ALL: &'static [Self] = &[
        DateWindow::LastDay,
        DateWindow::LastThreeDays,
        DateWindow::LastWeek,
        DateWindow::LastMonth,
    ];

    fn slug(self) -> &'static str {
        match self {
            DateWindow::LastDay => "1d",
            DateWindow::LastThreeDays => "3d",
            DateWindow::LastWeek => "7d",
            DateWindow::LastMonth => "30d",
        }
    }

    fn label(self) -> &'static str {
        match self {
            DateWindow::LastDay => "Last 24 hours",
            DateWindow::LastThreeDays => "Last 3 days",
            DateWindow::LastWeek => "Last 7 days",
            DateWindow::LastMonth => "Last 30 days",
        }
    }
}

impl FilterOption for ExperienceLevel {
    const ALL: &'static [Self] = &[
        ExperienceLevel::Entry,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
    ];

    fn slug(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry level",
            ExperienceLevel::Mid => "Mid level",
            ExperienceLevel::Senior => "Senior level",
        }
    }
}

impl FilterOption for EmploymentType {
    const ALL: &'static [Self] = &[
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Contract,
        EmploymentType::Internship,
        EmploymentType::Temporary,
    ];

    fn slug(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full-time",
            EmploymentType::PartTime => "part-time",
            EmploymentType::Contract => "contract",
            EmploymentType::Internship => "internship",
            EmploymentType::Temporary => "temporary",
        }
    }

    fn label(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contract => "Contract",
            EmploymentType::Internship => "Internship",
            EmploymentType::Temporary => "Temporary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SalaryBand {
    #[serde(rename = "0-50k")]
    UpTo50k,
    #[serde(rename = "50-100k")]
    From50kTo100k,
    #[serde(rename = "100k+")]
    Over100k,
}

impl FilterOption for SalaryBand {
    const ALL: &'static [Self] = &[
        SalaryBand::UpTo50k,
        SalaryBand::From50kTo100k,
        SalaryBand::Over100k,
    ];

    fn slug(self) -> &'static str {
        match self {
            SalaryBand::UpTo50k => "0-50k",
            SalaryBand::From50kTo100k => "50-100k",
            SalaryBand::Over100k => "100k+",
        }
    }

    fn label(self) -> &'static str {
        match self {
            SalaryBand::UpTo50k => "$0 - $50k",
            SalaryBand::From50kTo100k => "$50k - $100k",
            SalaryBand::Over100k => "$100k+",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub date_posted: BTreeSet<DateWindow>,
    pub experience: BTreeSet<ExperienceLevel>,
    pub commitment: BTreeSet<EmploymentType>,
    pub salary: BTreeSet<SalaryBand>,
    /// Company-name substrings, kept as typed; compared case-insensitively.
    pub company: BTreeSet<String>,
}

impl FilterCriteria {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_date_posted(mut self, window: DateWindow) -> Self {
        self.date_posted.insert(window);
        self
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_experience(mut self, level: ExperienceLevel) -> Self {
        self.experience.insert(level);
        self
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_commitment(mut self, kind: EmploymentType) -> Self {
        self.commitment.insert(kind);
        self
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_salary(mut self, band: SalaryBand) -> Self {
        self.salary.insert(band);
        self
    }

    /// Blank and sentinel values are ignored.
    pub fn with_company(mut self, substring: &str) -> Self {
        let substring = substring.trim();
        if !substring.is_empty() && !is_sentinel(substring) {
            self.company.insert(substring.to_string());
        }
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.date_posted.is_empty()
            && self.experience.is_empty()
            && self.commitment.is_empty()
            && self.salary.is_empty()
            && self.company.is_empty()
    }

    /// Filter-chip labels for every constrained dimension, e.g. `"Date: Last 7 days"`.
    pub fn active_filter_labels(&self) -> Vec<String> {
        let mut chips = Vec::new();
        push_chip(&mut chips, "Date", labels(&self.date_posted));
        push_chip(&mut chips, "Exp", labels(&self.experience));
        push_chip(&mut chips, "Commitment", labels(&self.commitment));
        push_chip(&mut chips, "Salary", labels(&self.salary));
        push_chip(
            &mut chips,
            "Company",
            self.company.iter().map(String::as_str).collect(),
        );
        chips
    }
}

fn labels<T: FilterOption>(set: &BTreeSet<T>) -> Vec<&'static str> {
    set.iter().map(|o| o.label()).collect()
}

fn push_chip(chips: &mut Vec<String>, name: &str, values: Vec<&str>) {
    if !values.is_empty() {
        chips.push(format!("{name}: {}", values.join(", ")));
    }
}

fn is_sentinel(raw: &str) -> bool {
    SENTINELS.iter().any(|s| s.eq_ignore_ascii_case(raw.trim()))
}

/// The selection as the UI sends it: one optional label string per dimension.
///
/// The enumerated dimensions accept comma-joined labels from the multi-select modal.
/// Company is a single substring since company names may themselves contain commas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub date_posted: Option<String>,
    pub experience: Option<String>,
    pub commitment: Option<String>,
    pub salary: Option<String>,
    pub company: Option<String>,
}

impl FilterSelection {
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            date_posted: parse_options("date_posted", self.date_posted.as_deref()),
            experience: parse_options("experience", self.experience.as_deref()),
            commitment: parse_options("commitment", self.commitment.as_deref()),
            salary: parse_options("salary", self.salary.as_deref()),
            company: BTreeSet::new(),
        }
        .with_company(self.company.as_deref().unwrap_or_default())
    }
}

/// Splits comma-joined labels. Sentinels and blanks drop out; unknown labels are logged
/// and dropped.
fn parse_options<T: FilterOption>(dimension: &str, raw: Option<&str>) -> BTreeSet<T> {
    let Some(raw) = raw else {
        return BTreeSet::new();
    };
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty() && !is_sentinel(part))
        .filter_map(|part| {
            let option = T::from_label(part);
            if option.is_none() {
                warn!("Ignoring unrecognized {dimension} filter value '{part}'");
            }
            option
        })
        .collect()
}
