use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config as RConfig, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_TIMEOUT_SECS, DEFAULT_WINDOW_HOURS, ENV_PREFIX,
};
use crate::types::ProductDescription;

/// Settings that may come from a config file or `SPOT_*` environment variables.
/// Command-line flags take precedence over every field.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub hours: i64,
    pub product_description: ProductDescription,
    pub timeout_secs: u64,

    pub profile: Option<String>,

    pub chart_width: Option<u16>,
    pub chart_height: Option<u16>,

    pub log_file: Option<PathBuf>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads defaults, then the config file, then environment overrides.
    /// An explicit `path` must exist; the default location is optional.
    pub fn load_config(path: Option<&Path>) -> Result<Config> {
        let mut builder = RConfig::builder()
            .set_default("hours", i64::from(DEFAULT_WINDOW_HOURS))?
            .set_default(
                "product_description",
                ProductDescription::default().as_str(),
            )?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?;

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(default_path) = Self::default_config_path() {
                    builder = builder.add_source(File::from(default_path).required(false));
                }
            }
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        builder
            .build()
            .context("failed to read config")?
            .try_deserialize()
            .context("failed to parse config")
    }
}
