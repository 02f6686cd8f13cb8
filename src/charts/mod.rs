//! Charts module - Figure building and static rendering

mod plotter;
mod renderer;

pub use plotter::{ChartPlotter, Figure, PieTrace, ScatterTrace};
pub use renderer::{RenderError, StaticChartRenderer, DEFAULT_HEIGHT, DEFAULT_WIDTH};
