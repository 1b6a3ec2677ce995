//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod corpus;
pub mod process;

use std::path::PathBuf;

use tracing::debug;

use ticket_core::models::config::TicketConfig;

/// Options shared by every subcommand.
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

impl GlobalOptions {
    /// Config file in use: the explicit one or the per-user default.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }

    /// Load the configuration and apply command-line overrides.
    pub fn load_config(&self) -> anyhow::Result<TicketConfig> {
        let config = match &self.config {
            Some(path) => TicketConfig::from_file(path)?,
            None => {
                let path = default_config_path();
                if path.exists() {
                    debug!("Using config {}", path.display());
                    TicketConfig::from_file(&path)?
                } else {
                    TicketConfig::default()
                }
            }
        };

        Ok(match &self.data_dir {
            Some(dir) => config.with_data_dir(dir),
            None => config,
        })
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ticket")
        .join("config.json")
}
