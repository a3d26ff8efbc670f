//! Pipeline configuration file support.
//!
//! Settings are read from `forecast.toml`; every key is optional. Environment
//! variables `HOST`, `PORT` and `PARKING_MODEL_PATH` override the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ErrorContext, ForecastError, ForecastResult};
use crate::services::generator::GeneratorConfig;
use crate::services::trainer::TrainingConfig;

pub const CONFIG_FILE_NAME: &str = "forecast.toml";

pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_MODEL_PATH: &str = "PARKING_MODEL_PATH";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub training: TrainingConfig,
    #[serde(default)]
    pub artifact: ArtifactSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Synthetic history settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default = "default_hour_start")]
    pub hour_start: u8,
    #[serde(default = "default_hour_end")]
    pub hour_end: u8,
    #[serde(default = "default_generator_seed")]
    pub seed: u64,
    /// Where the generated rows are written as CSV.
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,
}

/// Model file location shared by the trainer and the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSettings {
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_days() -> u32 {
    90
}

fn default_hour_start() -> u8 {
    6
}

fn default_hour_end() -> u8 {
    23
}

fn default_generator_seed() -> u64 {
    7
}

fn default_export_path() -> PathBuf {
    PathBuf::from("parking_data.csv")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("parking_model.bin")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            days: default_days(),
            hour_start: default_hour_start(),
            hour_end: default_hour_end(),
            seed: default_generator_seed(),
            export_path: default_export_path(),
        }
    }
}

impl GeneratorSettings {
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            days: self.days,
            hour_start: self.hour_start,
            hour_end: self.hour_end,
        }
    }
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            path: default_model_path(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// `host:port` as accepted by `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ForecastConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ForecastConfig)` if successful
    /// * `Err(ForecastError)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> ForecastResult<Self> {
        let path = path.as_ref();
        let ctx = || ErrorContext::new("load_config").with_path(path);

        let content = fs::read_to_string(path).map_err(|e| {
            ForecastError::configuration_with_context(
                format!("Failed to read config file: {}", e),
                ctx(),
            )
        })?;

        toml::from_str(&content).map_err(|e| {
            ForecastError::configuration_with_context(
                format!("Failed to parse config file: {}", e),
                ctx(),
            )
        })
    }

    /// Locate the configuration file.
    ///
    /// Searches for `forecast.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn find_default_location() -> Option<PathBuf> {
        [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ]
        .into_iter()
        .find(|p| p.exists())
    }

    /// Resolve, override from the process environment, and validate.
    ///
    /// An explicit `path` must exist. Without one the standard locations are
    /// searched and the defaults are used when none holds a file.
    pub fn load(path: Option<&Path>) -> ForecastResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::find_default_location() {
                Some(found) => Self::from_file(found)?,
                None => Self::default(),
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `HOST`, `PORT` and `PARKING_MODEL_PATH` from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ForecastResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| {
                ForecastError::configuration_with_context(
                    format!("{} must be a port number, got {:?}", ENV_PORT, port),
                    ErrorContext::new("load_config").with_field(ENV_PORT),
                )
            })?;
        }
        if let Some(path) = lookup(ENV_MODEL_PATH) {
            self.artifact.path = PathBuf::from(path);
        }
        Ok(())
    }

    pub fn validate(&self) -> ForecastResult<()> {
        self.generator.generator_config().validate()?;
        self.training.validate()?;
        if self.artifact.path.as_os_str().is_empty() {
            return Err(ForecastError::configuration_with_context(
                "artifact path must not be empty",
                ErrorContext::new("load_config").with_field("artifact.path"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: ForecastConfig = toml::from_str("").unwrap();
        assert_eq!(config, ForecastConfig::default());
        assert_eq!(config.generator.days, 90);
        assert_eq!(config.generator.seed, 7);
        assert_eq!(config.training.seed, 42);
        assert_eq!(config.training.n_trees, 100);
        assert_eq!(config.artifact.path, PathBuf::from("parking_model.bin"));
        assert_eq!(config.server.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_parse_partial_sections() {
        let toml = r#"
[generator]
days = 30
export_path = "out/history.csv"

[training]
n_trees = 12
max_depth = 8

[server]
port = 8080
"#;

        let config: ForecastConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.generator.days, 30);
        assert_eq!(config.generator.hour_start, 6);
        assert_eq!(config.generator.export_path, PathBuf::from("out/history.csv"));
        assert_eq!(config.training.n_trees, 12);
        assert_eq!(config.training.max_depth, Some(8));
        assert_eq!(config.training.test_ratio, 0.2);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[generator\ndays = ").unwrap();

        let err = ForecastConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), "CONFIGURATION_ERROR");
        assert!(err.message().contains("parse"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ForecastConfig::load(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
        assert_eq!(err.kind(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let vars: HashMap<&str, &str> = [
            (ENV_HOST, "127.0.0.1"),
            (ENV_PORT, "9000"),
            (ENV_MODEL_PATH, "/tmp/m.bin"),
        ]
        .into_iter()
        .collect();

        let mut config = ForecastConfig::default();
        config
            .apply_overrides(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.server.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.artifact.path, PathBuf::from("/tmp/m.bin"));
    }

    #[test]
    fn test_bad_port_override() {
        let mut config = ForecastConfig::default();
        let err = config
            .apply_overrides(|k| (k == ENV_PORT).then(|| "eighty".to_string()))
            .unwrap_err();
        assert_eq!(err.kind(), "CONFIGURATION_ERROR");
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ForecastConfig::default();
        config.generator.hour_start = 20;
        config.generator.hour_end = 10;
        assert!(config.validate().is_err());

        let mut config = ForecastConfig::default();
        config.generator.days = 0;
        assert!(config.validate().is_err());

        let mut config = ForecastConfig::default();
        config.training.test_ratio = 0.0;
        assert!(config.validate().is_err());

        let mut config = ForecastConfig::default();
        config.training.n_trees = 0;
        assert!(config.validate().is_err());
    }
}
