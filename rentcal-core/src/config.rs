//! Global rentcal configuration.

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::WeekStart;
use crate::error::{RentCalError, RentCalResult};

static DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Configuration at ~/.config/rentcal/config.toml
///
/// Every key can be overridden with a `RENTCAL_` environment variable,
/// e.g. `RENTCAL_API_URL`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RentcalConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Listing used when a command doesn't name one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_listing: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub week_starts_on: WeekStart,
}

impl Default for RentcalConfig {
    fn default() -> Self {
        RentcalConfig {
            api_url: default_api_url(),
            api_token: None,
            default_listing: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            week_starts_on: WeekStart::default(),
        }
    }
}

impl RentcalConfig {
    pub fn config_path() -> RentCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RentCalError::Config("Could not determine config directory".into()))?
            .join("rentcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template first if
    /// there is no config file yet.
    pub fn load() -> RentCalResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> RentCalResult<Self> {
        debug!(path = %path.display(), "loading config");

        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("RENTCAL"))
            .build()
            .map_err(|e| RentCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RentCalError::Config(e.to_string()))
    }

    /// Listing to operate on: the explicit one, else the configured default.
    pub fn listing(&self, explicit: Option<&str>) -> RentCalResult<String> {
        explicit
            .or(self.default_listing.as_deref())
            .filter(|id| !id.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                RentCalError::Config(
                    "No listing given. Pass --listing or set default_listing in config.toml".into(),
                )
            })
    }

    /// Save the current config to `path`.
    pub fn save(&self, path: &Path) -> RentCalResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| RentCalError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| RentCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> RentCalResult<()> {
        let contents = format!(
            "\
# rentcal configuration

# Marketplace API the calendar talks to:
# api_url = \"{}\"

# Bearer token sent with every request:
# api_token = \"\"

# Listing used when --listing is not given:
# default_listing = \"villa-1\"

# Request timeout in seconds:
# timeout_secs = {}

# First column of the month grid (sunday or monday):
# week_starts_on = \"sunday\"
",
            DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RentCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RentCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
