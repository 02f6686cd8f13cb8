//! Stats module - launch outcome aggregations

mod calculator;

pub use calculator::{BoosterSuccessRate, CategoryCount, StatsCalculator};
