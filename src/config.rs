//! Configuration management for the CLI.
use crate::error::PanelError;
use config::Config;
use serde::Deserialize;

/// Settings for a panel session, loaded from a TOML file.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub log_level: String,
    pub mode: String,
    pub catalogue_path: String,
    pub params_path: String,
}

impl Settings {
    /// Loads settings from `name` (a path without extension, resolved by the
    /// `config` crate).
    pub fn new(name: &str) -> Result<Self, PanelError> {
        let s = Config::builder()
            .add_source(config::File::with_name(name))
            .build()
            .map_err(PanelError::Config)?;

        s.try_deserialize().map_err(PanelError::Config)
    }
}
