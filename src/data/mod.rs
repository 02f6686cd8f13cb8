//! Data module - CSV loading and row filtering

mod loader;
mod processor;

pub use loader::{DataLoader, LaunchRecord, LaunchTable, LoaderError, Outcome};
pub use processor::{DataProcessor, PayloadBounds, PayloadRange, SiteSelection, ALL_SITES};

#[cfg(test)]
pub(crate) use loader::sample_table;
