//! Data Processor Module
//! Derived lookups (site list, payload bounds) and row filters over the launch table.

use crate::data::{LaunchRecord, LaunchTable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Wire value of the "all sites" dropdown option.
pub const ALL_SITES: &str = "ALL";

/// Dropdown selection: every site, or one concrete site name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(name) => record.launch_site == *name,
        }
    }
}

// A blank value is never a dropdown option; it falls back to all sites
impl From<&str> for SiteSelection {
    fn from(value: &str) -> Self {
        if value == ALL_SITES || value.trim().is_empty() {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }
}

impl From<String> for SiteSelection {
    fn from(value: String) -> Self {
        if value == ALL_SITES || value.trim().is_empty() {
            SiteSelection::All
        } else {
            SiteSelection::Site(value)
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => f.write_str(ALL_SITES),
            SiteSelection::Site(name) => f.write_str(name),
        }
    }
}

/// Inclusive payload interval in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    /// Returns `None` unless `0 <= low <= high`.
    pub fn new(low: f64, high: f64) -> Option<Self> {
        if low.is_nan() || high.is_nan() || low < 0.0 || low > high {
            return None;
        }
        Some(Self { low, high })
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        payload_mass_kg >= self.low && payload_mass_kg <= self.high
    }
}

/// Observed payload min/max, the slider's default value.
pub type PayloadBounds = PayloadRange;

/// Handles lookups and filtering over the immutable launch table.
pub struct DataProcessor;

impl DataProcessor {
    /// Distinct launch sites in first-appearance order.
    pub fn launch_sites(table: &LaunchTable) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut sites = Vec::new();
        for record in table.records() {
            if seen.insert(record.launch_site.as_str()) {
                sites.push(record.launch_site.clone());
            }
        }
        sites
    }

    /// Distinct booster categories in first-appearance order.
    pub fn booster_categories<'a, I>(records: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a LaunchRecord>,
    {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut categories = Vec::new();
        for record in records {
            if seen.insert(record.booster_version_category.as_str()) {
                categories.push(record.booster_version_category.clone());
            }
        }
        categories
    }

    /// Minimum and maximum payload mass, `None` for an empty table.
    pub fn payload_bounds(table: &LaunchTable) -> Option<PayloadBounds> {
        let mut iter = table.records().iter().map(|r| r.payload_mass_kg);
        let first = iter.next()?;
        let (low, high) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(PayloadRange { low, high })
    }

    /// Rows belonging to the selected site.
    pub fn filter_by_site<'a>(
        table: &'a LaunchTable,
        site: &'a SiteSelection,
    ) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
        table.records().iter().filter(move |r| site.matches(r))
    }

    /// Rows inside the payload range that belong to the selected site.
    pub fn filter_rows<'a>(
        table: &'a LaunchTable,
        site: &'a SiteSelection,
        range: PayloadRange,
    ) -> Vec<&'a LaunchRecord> {
        table
            .records()
            .iter()
            .filter(|r| range.contains(r.payload_mass_kg))
            .filter(|r| site.matches(r))
            .collect()
    }
}
