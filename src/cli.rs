//! Command-line configuration for the dashboard server.
//!
//! - `--data`: launch records CSV (read once at startup)
//! - `--host`, `--port`: listen address
//! - `--slider-max`, `--slider-step`: payload slider scale
//!
//! Log verbosity comes from `RUST_LOG` (default `info`).

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::web::SliderConfig;

#[derive(Parser, Debug)]
#[command(name = "launch_dashboard")]
#[command(author, version, about = "Interactive launch records dashboard")]
pub struct Cli {
    /// Launch records CSV file
    #[arg(long, default_value = "spacex_launch_dash.csv")]
    pub data: PathBuf,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port for the web server
    #[arg(short, long, default_value = "8051")]
    pub port: u16,

    /// Upper end of the payload slider in kg
    #[arg(long, default_value = "10000")]
    pub slider_max: u32,

    /// Slider step and mark spacing in kg
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u32).range(1..))]
    pub slider_step: u32,
}

impl Cli {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn slider(&self) -> SliderConfig {
        SliderConfig::new(self.slider_max, self.slider_step)
    }
}
