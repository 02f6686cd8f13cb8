//! Static Chart Renderer
//! Draws dashboard figures into standalone SVG documents with plotters.
//!
//! Layout:
//! 1. Title: figure title centered on top
//! 2. Pie figures: one slice per label, percentages inside the slices
//! 3. Scatter figures: payload (x) vs outcome class (y), one colored
//!    series per booster category, legend in the upper right

use crate::charts::plotter::{OUTCOME_AXIS_TITLE, PALETTE, PAYLOAD_AXIS_TITLE};
use crate::charts::{Figure, PieTrace, ScatterTrace};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 500;

const TITLE_FONT_SIZE: i32 = 22;
const LABEL_FONT_SIZE: i32 = 14;
const POINT_RADIUS: i32 = 5;

// Empty scatter x-axis, matches the payload slider scale
const FALLBACK_PAYLOAD_AXIS: (f64, f64) = (0.0, 10000.0);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Drawing(err.to_string())
    }
}

type SvgArea<'a> = DrawingArea<SVGBackend<'a>, Shift>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a figure as an SVG document.
    pub fn render_svg(figure: &Figure, width: u32, height: u32) -> Result<String, RenderError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            root.fill(&WHITE)?;

            let area = root.titled(figure.title(), ("sans-serif", TITLE_FONT_SIZE))?;
            match figure.pie() {
                Some(pie) => Self::draw_pie(&area, pie)?,
                None => Self::draw_scatter(&area, figure)?,
            }

            root.present()?;
        }
        Ok(svg)
    }

    fn draw_pie(area: &SvgArea<'_>, pie: &PieTrace) -> Result<(), RenderError> {
        if pie.total() == 0 {
            return Self::draw_no_data(area);
        }

        let (w, h) = area.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = f64::from(w.min(h)) * 0.38;

        let sizes: Vec<f64> = pie.values.iter().map(|&v| v as f64).collect();
        let colors: Vec<RGBColor> = pie
            .marker
            .colors
            .iter()
            .enumerate()
            .map(|(i, c)| parse_hex_color(c).unwrap_or_else(|| palette_rgb(i)))
            .collect();

        let mut element = Pie::new(&center, &radius, &sizes, &colors, &pie.labels);
        element.start_angle(-90.0);
        element.label_style(("sans-serif", LABEL_FONT_SIZE).into_font().color(&BLACK));
        element.percentages(("sans-serif", radius * 0.08).into_font().color(&WHITE));
        area.draw(&element)?;

        Ok(())
    }

    fn draw_scatter(area: &SvgArea<'_>, figure: &Figure) -> Result<(), RenderError> {
        let traces: Vec<&ScatterTrace> = figure.scatter_traces().collect();
        if traces.iter().all(|t| t.x.is_empty()) {
            return Self::draw_no_data(area);
        }

        let x_desc = figure
            .layout
            .xaxis
            .as_ref()
            .map_or(PAYLOAD_AXIS_TITLE, |a| a.title.text.as_str());
        let y_desc = figure
            .layout
            .yaxis
            .as_ref()
            .map_or(OUTCOME_AXIS_TITLE, |a| a.title.text.as_str());

        let (x_min, x_max) =
            payload_axis_range(traces.iter().flat_map(|t| t.x.iter().copied()));

        let mut chart = ChartBuilder::on(area)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, -0.5f64..1.5f64)?;

        chart
            .configure_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .y_labels(5)
            .draw()?;

        for (i, trace) in traces.iter().enumerate() {
            let color = parse_hex_color(&trace.marker.color).unwrap_or_else(|| palette_rgb(i));

            chart
                .draw_series(trace.x.iter().zip(&trace.y).map(|(&x, &y)| {
                    Circle::new((x, f64::from(y)), POINT_RADIUS, color.filled())
                }))?
                .label(trace.name.as_str())
                .legend(move |(x, y)| Circle::new((x, y), POINT_RADIUS, color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        Ok(())
    }

    fn draw_no_data(area: &SvgArea<'_>) -> Result<(), RenderError> {
        let (w, h) = area.dim_in_pixel();
        let style = ("sans-serif", LABEL_FONT_SIZE)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw_text("No data", &style, (w as i32 / 2, h as i32 / 2))?;
        Ok(())
    }
}

/// Parse a `#rrggbb` color.
pub fn parse_hex_color(hex: &str) -> Option<RGBColor> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

fn palette_rgb(index: usize) -> RGBColor {
    let (r, g, b) = PALETTE[index % PALETTE.len()];
    RGBColor(r, g, b)
}

/// X-axis range around the plotted payloads with a small margin.
pub fn payload_axis_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min.is_infinite() || max.is_infinite() {
        return FALLBACK_PAYLOAD_AXIS;
    }

    let pad = ((max - min) * 0.05).max(100.0);
    (min - pad, max + pad)
}
