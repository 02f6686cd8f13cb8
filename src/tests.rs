//! Invariants of the dashboard charts over the launch table.
//!
//! # Test Categories
//!
//! - **Pie**: slice totals agree with the underlying row counts
//! - **Scatter**: the plotted points are exactly the filtered rows
//! - **Purity**: identical inputs give identical figures

#[cfg(test)]
mod pie {
    use crate::charts::ChartPlotter;
    use crate::data::{sample_table, DataProcessor, SiteSelection};

    /// All-sites slices add up to the number of successful launches.
    #[test]
    fn all_sites_total_equals_success_rows() {
        let table = sample_table();
        let figure = ChartPlotter::pie_chart(&table, &SiteSelection::All);

        let successes = table
            .records()
            .iter()
            .filter(|r| r.outcome.is_success())
            .count() as u64;
        assert_eq!(figure.pie().unwrap().total(), successes);
    }

    /// A single site's slices add up to its row count, in at most two slices.
    #[test]
    fn site_total_equals_site_rows() {
        let table = sample_table();

        for name in DataProcessor::launch_sites(&table) {
            let site = SiteSelection::Site(name.clone());
            let figure = ChartPlotter::pie_chart(&table, &site);
            let pie = figure.pie().unwrap();

            let rows = table.records().iter().filter(|r| r.launch_site == name).count() as u64;
            assert_eq!(pie.total(), rows, "site {}", name);
            assert!(pie.labels.len() <= 2, "site {}", name);
            assert!(pie
                .labels
                .iter()
                .all(|l| l == "Success" || l == "Failure"));
        }
    }
}

#[cfg(test)]
mod scatter {
    use crate::charts::{ChartPlotter, Figure};
    use crate::data::{sample_table, DataProcessor, PayloadRange, SiteSelection};

    fn plotted_points(figure: &Figure) -> Vec<(f64, u8, String, String)> {
        let mut points: Vec<_> = figure
            .scatter_traces()
            .flat_map(|t| {
                t.x.iter()
                    .zip(&t.y)
                    .zip(&t.text)
                    .map(move |((&x, &y), site)| (x, y, site.clone(), t.name.clone()))
            })
            .collect();
        points.sort_by(|a, b| a.partial_cmp(b).unwrap());
        points
    }

    /// Points are exactly the rows inside the range for the selected site.
    #[test]
    fn points_match_filtered_rows() {
        let table = sample_table();
        let ranges = [(0.0, 10000.0), (500.0, 3136.0), (3136.0, 3136.0), (9601.0, 10000.0)];
        let mut sites = vec![SiteSelection::All];
        sites.extend(
            DataProcessor::launch_sites(&table)
                .into_iter()
                .map(SiteSelection::Site),
        );

        for site in &sites {
            for &(low, high) in &ranges {
                let range = PayloadRange::new(low, high).unwrap();
                let figure = ChartPlotter::scatter_chart(&table, site, range);

                let mut expected: Vec<_> = table
                    .records()
                    .iter()
                    .filter(|r| r.payload_mass_kg >= low && r.payload_mass_kg <= high)
                    .filter(|r| site.matches(r))
                    .map(|r| {
                        (
                            r.payload_mass_kg,
                            r.outcome.class(),
                            r.launch_site.clone(),
                            r.booster_version_category.clone(),
                        )
                    })
                    .collect();
                expected.sort_by(|a, b| a.partial_cmp(b).unwrap());

                assert_eq!(
                    plotted_points(&figure),
                    expected,
                    "site={} range=[{}, {}]",
                    site,
                    low,
                    high
                );
            }
        }
    }

    /// All sites over the observed bounds shows every row.
    #[test]
    fn full_range_shows_every_row() {
        let table = sample_table();
        let bounds = DataProcessor::payload_bounds(&table).unwrap();
        let figure = ChartPlotter::scatter_chart(&table, &SiteSelection::All, bounds);
        assert_eq!(figure.point_count(), table.len());
    }

    /// A zero-width range keeps only rows with exactly that payload.
    #[test]
    fn point_range_is_inclusive() {
        let table = sample_table();
        let range = PayloadRange::new(3136.0, 3136.0).unwrap();
        let figure = ChartPlotter::scatter_chart(&table, &SiteSelection::All, range);

        assert_eq!(figure.point_count(), 2);
        assert!(figure
            .scatter_traces()
            .flat_map(|t| t.x.iter())
            .all(|&x| x == 3136.0));
    }

    #[test]
    fn empty_range_has_no_traces() {
        let table = sample_table();
        let range = PayloadRange::new(9700.0, 9800.0).unwrap();
        let figure = ChartPlotter::scatter_chart(&table, &SiteSelection::All, range);
        assert!(figure.data.is_empty());
        assert_eq!(figure.point_count(), 0);
    }
}

#[cfg(test)]
mod purity {
    use crate::charts::ChartPlotter;
    use crate::data::{sample_table, PayloadRange, SiteSelection};

    #[test]
    fn repeated_calls_are_identical() {
        let table = sample_table();
        let site = SiteSelection::from("KSC LC-39A");
        let range = PayloadRange::new(2000.0, 6000.0).unwrap();

        assert_eq!(
            ChartPlotter::pie_chart(&table, &site),
            ChartPlotter::pie_chart(&table, &site)
        );
        assert_eq!(
            ChartPlotter::scatter_chart(&table, &site, range),
            ChartPlotter::scatter_chart(&table, &site, range)
        );
        assert_eq!(
            ChartPlotter::pie_chart(&table, &SiteSelection::All),
            ChartPlotter::pie_chart(&table, &SiteSelection::All)
        );
    }

    #[test]
    fn handlers_leave_table_untouched() {
        let table = sample_table();
        let before = table.records().to_vec();

        let range = PayloadRange::new(0.0, 5000.0).unwrap();
        let _ = ChartPlotter::pie_chart(&table, &SiteSelection::All);
        let _ = ChartPlotter::scatter_chart(&table, &SiteSelection::All, range);

        assert_eq!(table.records(), before.as_slice());
    }
}
