//! Web module - dashboard page and HTTP endpoints

mod page;
mod server;

pub use page::SliderConfig;
pub use server::{run_server, AppState};
