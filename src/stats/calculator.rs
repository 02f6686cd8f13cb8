//! Statistics Calculator Module
//! Outcome counts per site and booster success rates over the launch table.

use crate::data::{DataProcessor, LaunchRecord, LaunchTable, Outcome, SiteSelection};
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One labelled count, a pie slice before styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: u64,
}

/// Success rate for one booster version category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoosterSuccessRate {
    pub category: String,
    pub success_rate: f64,
    pub launches: usize,
}

/// Aggregations over the launch table.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Successful launches grouped by site, ordered by site name.
    ///
    /// Sites without a single success are absent.
    pub fn success_counts_by_site(table: &LaunchTable) -> Vec<CategoryCount> {
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for record in table.records().iter().filter(|r| r.outcome.is_success()) {
            *counts.entry(record.launch_site.as_str()).or_default() += 1;
        }

        counts
            .into_iter()
            .map(|(site, count)| CategoryCount {
                label: site.to_string(),
                count,
            })
            .collect()
    }

    /// Success and failure counts for the selected rows.
    ///
    /// Ordered by count descending; zero categories are dropped. On a tie
    /// `Success` always comes first, regardless of which outcome appears
    /// first in the rows.
    pub fn outcome_counts<'a, I>(records: I) -> Vec<CategoryCount>
    where
        I: IntoIterator<Item = &'a LaunchRecord>,
    {
        let (mut success, mut failure) = (0u64, 0u64);
        for record in records {
            match record.outcome {
                Outcome::Success => success += 1,
                Outcome::Failure => failure += 1,
            }
        }

        let mut counts = vec![
            (Outcome::Success, success),
            (Outcome::Failure, failure),
        ];
        // Stable sort keeps Success ahead on ties
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        counts
            .into_iter()
            .filter(|&(_, count)| count > 0)
            .map(|(outcome, count)| CategoryCount {
                label: outcome.label().to_string(),
                count,
            })
            .collect()
    }

    /// Outcome counts for one site (or the whole table for `All`).
    pub fn site_outcome_counts(table: &LaunchTable, site: &SiteSelection) -> Vec<CategoryCount> {
        Self::outcome_counts(DataProcessor::filter_by_site(table, site))
    }

    /// Mean outcome class per booster category, best first.
    pub fn booster_success_rates(table: &LaunchTable) -> Vec<BoosterSuccessRate> {
        let categories = DataProcessor::booster_categories(table.records());

        let mut rates: Vec<BoosterSuccessRate> = categories
            .par_iter()
            .map(|category| {
                let classes: Vec<f64> = table
                    .records()
                    .iter()
                    .filter(|r| &r.booster_version_category == category)
                    .map(|r| f64::from(r.outcome.class()))
                    .collect();

                BoosterSuccessRate {
                    category: category.clone(),
                    launches: classes.len(),
                    success_rate: classes.iter().mean(),
                }
            })
            .collect();

        rates.sort_by(|a, b| {
            b.success_rate
                .partial_cmp(&a.success_rate)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });
        rates
    }
}
