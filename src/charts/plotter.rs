//! Chart Plotter Module
//! Builds Plotly-compatible figure descriptions for the pie and scatter charts.

use crate::data::{DataProcessor, LaunchTable, PayloadRange, SiteSelection};
use crate::stats::{CategoryCount, StatsCalculator};
use serde::Serialize;

/// Qualitative color palette (Plotly default sequence).
pub const PALETTE: [(u8, u8, u8); 10] = [
    (99, 110, 250),  // Blue
    (239, 85, 59),   // Red
    (0, 204, 150),   // Green
    (171, 99, 250),  // Purple
    (255, 161, 90),  // Orange
    (25, 211, 243),  // Cyan
    (255, 102, 146), // Pink
    (182, 232, 128), // Light Green
    (255, 151, 255), // Light Pink
    (254, 203, 82),  // Yellow
];

pub const PAYLOAD_AXIS_TITLE: &str = "Payload Mass (kg)";
pub const OUTCOME_AXIS_TITLE: &str = "Launch Outcome (0=Fail, 1=Success)";
pub const BOOSTER_LEGEND_TITLE: &str = "Booster Version Category";

/// Palette color as `#rrggbb`.
pub fn palette_color(index: usize) -> String {
    let (r, g, b) = PALETTE[index % PALETTE.len()];
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieMarker {
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub marker: PieMarker,
}

impl PieTrace {
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterMarker {
    pub color: String,
}

/// One booster category's points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub name: String,
    pub legendgroup: String,
    pub mode: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<u8>,
    /// Launch site per point, shown on hover.
    pub text: Vec<String>,
    pub marker: ScatterMarker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie(PieTrace),
    Scatter(ScatterTrace),
}

/// Plotly figure: traces plus layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn title(&self) -> &str {
        &self.layout.title.text
    }

    pub fn pie(&self) -> Option<&PieTrace> {
        self.data.iter().find_map(|t| match t {
            Trace::Pie(pie) => Some(pie),
            Trace::Scatter(_) => None,
        })
    }

    pub fn scatter_traces(&self) -> impl Iterator<Item = &ScatterTrace> {
        self.data.iter().filter_map(|t| match t {
            Trace::Scatter(scatter) => Some(scatter),
            Trace::Pie(_) => None,
        })
    }

    /// Number of plotted scatter points across all traces.
    pub fn point_count(&self) -> usize {
        self.scatter_traces().map(|t| t.x.len()).sum()
    }
}

/// Builds the dashboard figures from the launch table.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Pie chart for the site dropdown.
    ///
    /// `All` shows successful launches per site; a concrete site shows its
    /// success/failure split.
    pub fn pie_chart(table: &LaunchTable, site: &SiteSelection) -> Figure {
        let (counts, title) = match site {
            SiteSelection::All => (
                StatsCalculator::success_counts_by_site(table),
                "Total Successful Launches by Site".to_string(),
            ),
            SiteSelection::Site(name) => (
                StatsCalculator::site_outcome_counts(table, site),
                format!("Success vs Failure Launches for site {}", name),
            ),
        };

        Figure {
            data: vec![Trace::Pie(Self::pie_trace(counts))],
            layout: Layout {
                title: Title::new(title),
                xaxis: None,
                yaxis: None,
                legend: None,
            },
        }
    }

    fn pie_trace(counts: Vec<CategoryCount>) -> PieTrace {
        let colors = (0..counts.len()).map(palette_color).collect();
        let (labels, values): (Vec<String>, Vec<u64>) =
            counts.into_iter().map(|c| (c.label, c.count)).unzip();
        PieTrace {
            labels,
            values,
            marker: PieMarker { colors },
        }
    }

    /// Payload vs outcome scatter, one trace per booster category.
    pub fn scatter_chart(table: &LaunchTable, site: &SiteSelection, range: PayloadRange) -> Figure {
        let rows = DataProcessor::filter_rows(table, site, range);
        let categories = DataProcessor::booster_categories(rows.iter().copied());

        let data = categories
            .into_iter()
            .enumerate()
            .map(|(i, category)| {
                let points: Vec<_> = rows
                    .iter()
                    .filter(|r| r.booster_version_category == category)
                    .collect();

                Trace::Scatter(ScatterTrace {
                    name: category.clone(),
                    legendgroup: category,
                    mode: "markers",
                    x: points.iter().map(|r| r.payload_mass_kg).collect(),
                    y: points.iter().map(|r| r.outcome.class()).collect(),
                    text: points.iter().map(|r| r.launch_site.clone()).collect(),
                    marker: ScatterMarker {
                        color: palette_color(i),
                    },
                })
            })
            .collect();

        let title = match site {
            SiteSelection::All => "Payload vs. Outcome for All Sites".to_string(),
            SiteSelection::Site(name) => format!("Payload vs. Outcome for Site {}", name),
        };

        Figure {
            data,
            layout: Layout {
                title: Title::new(title),
                xaxis: Some(Axis {
                    title: Title::new(PAYLOAD_AXIS_TITLE),
                }),
                yaxis: Some(Axis {
                    title: Title::new(OUTCOME_AXIS_TITLE),
                }),
                legend: Some(Legend {
                    title: Title::new(BOOSTER_LEGEND_TITLE),
                }),
            },
        }
    }
}
