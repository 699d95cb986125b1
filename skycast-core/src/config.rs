use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// City looked up at startup when none is configured.
pub const DEFAULT_CITY: &str = "London";

/// Coordinates the CLI host reports as the device position.
///
/// Terminals have no positioning hardware, so the configured home location
/// stands in for the platform's geolocation capability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomeCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather API key.
    pub api_key: Option<String>,

    /// City shown when the app starts without arguments.
    pub default_city: Option<String>,

    /// Example TOML:
    /// [home]
    /// latitude = 51.51
    /// longitude = -0.13
    pub home: Option<HomeCoordinates>,
}

impl Config {
    /// Return the API key, or an actionable error when none is configured.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `skycast configure` and enter your OpenWeather API key."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Startup city, falling back to [`DEFAULT_CITY`].
    pub fn default_city(&self) -> &str {
        self.default_city.as_deref().unwrap_or(DEFAULT_CITY)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.require_api_key().unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("Hint: run `skycast configure`"));
    }

    #[test]
    fn set_api_key_round_trips() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());

        assert_eq!(cfg.require_api_key().expect("key must exist"), "KEY");
    }

    #[test]
    fn default_city_falls_back_to_london() {
        let cfg = Config::default();
        assert_eq!(cfg.default_city(), "London");

        let cfg = Config {
            default_city: Some("Kyiv".to_string()),
            ..Default::default()
        };
        assert_eq!(cfg.default_city(), "Kyiv");
    }

    #[test]
    fn toml_round_trip_preserves_fields() {
        let cfg = Config {
            api_key: Some("KEY".to_string()),
            default_city: Some("Oslo".to_string()),
            home: Some(HomeCoordinates {
                latitude: 59.91,
                longitude: 10.75,
            }),
        };

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&text).expect("parse");

        assert_eq!(parsed.api_key.as_deref(), Some("KEY"));
        assert_eq!(parsed.default_city.as_deref(), Some("Oslo"));
        assert_eq!(parsed.home, cfg.home);
    }
}
