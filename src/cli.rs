//! # Command Line Interface

use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "caregate")]
#[command(about = "Hospital management backend: identity, sessions and role-based access")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file path (TOML or YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Port override for the HTTP API
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
