use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Public JMA endpoint for the area metadata document.
pub const DEFAULT_AREA_URL: &str = "https://www.jma.go.jp/bosai/common/const/area.json";

/// Public JMA endpoint template for per-area forecasts.
/// `{code}` is replaced with the selected area code.
pub const DEFAULT_FORECAST_URL: &str =
    "https://www.jma.go.jp/bosai/forecast/data/forecast/{code}.json";

/// JMA endpoint settings.
///
/// The defaults point at the public API, so the app runs with no
/// configuration file present. Overriding them is only expected in tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JmaEndpoints {
    /// URL of the area metadata document.
    pub area_url: String,

    /// Forecast URL template containing a `{code}` placeholder.
    pub forecast_url: String,
}

impl Default for JmaEndpoints {
    fn default() -> Self {
        Self {
            area_url: DEFAULT_AREA_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// SQLite database path (storing variant)
    pub database_path: PathBuf,

    /// JMA endpoint settings
    #[serde(default)]
    pub jma: JmaEndpoints,
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tenki");

        let database_path = config_dir.join("weather_data.db");

        Self {
            config_dir,
            database_path,
            jma: JmaEndpoints::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let config = Self::load_from(&config_path)?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Validate the configuration
    ///
    /// Checks that the endpoint URLs parse and that the forecast template
    /// carries the `{code}` placeholder.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.jma.area_url)
            .map_err(|e| ConfigError::Invalid(format!("jma.area_url: {}", e)))?;

        // Validate the template with the placeholder substituted out
        let probe = self.jma.forecast_url.replace("{code}", "000000");
        Url::parse(&probe)
            .map_err(|e| ConfigError::Invalid(format!("jma.forecast_url: {}", e)))?;

        if !self.jma.forecast_url.contains("{code}") {
            return Err(ConfigError::Invalid(
                "jma.forecast_url is missing the {code} placeholder".to_string(),
            ));
        }

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("tenki");

        Ok(config_dir.join("config.toml"))
    }
}
