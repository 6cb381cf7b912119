//! Configuration for the F1 API.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dataset::TableSources;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Historical dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Directory holding the CSV tables
    #[serde(default = "default_dataset_dir")]
    pub dir: String,
    #[serde(default = "default_races_file")]
    pub races_file: String,
    #[serde(default = "default_laps_file")]
    pub laps_file: String,
    #[serde(default = "default_drivers_file")]
    pub drivers_file: String,
    /// Load the tables once at startup instead of on every query
    #[serde(default = "default_preload")]
    pub preload: bool,
    /// Extra attempts when the startup load fails
    #[serde(default = "default_load_retries")]
    pub load_retries: u32,
}

fn default_dataset_dir() -> String {
    "data/f1".to_string()
}

fn default_races_file() -> String {
    "races.csv".to_string()
}

fn default_laps_file() -> String {
    "lap_times.csv".to_string()
}

fn default_drivers_file() -> String {
    "drivers.csv".to_string()
}

fn default_preload() -> bool {
    true
}

fn default_load_retries() -> u32 {
    2
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            dir: default_dataset_dir(),
            races_file: default_races_file(),
            laps_file: default_laps_file(),
            drivers_file: default_drivers_file(),
            preload: default_preload(),
            load_retries: default_load_retries(),
        }
    }
}

impl DatasetConfig {
    /// Resolve the three table paths. Absolute file names ignore `dir`.
    pub fn sources(&self) -> TableSources {
        let dir = Path::new(&self.dir);
        let resolve = |file: &str| -> PathBuf { dir.join(file) };
        TableSources {
            races: resolve(&self.races_file),
            laps: resolve(&self.laps_file),
            drivers: resolve(&self.drivers_file),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
}

impl AppConfig {
    /// Load configuration from defaults, `config.*` in the working directory
    /// and the environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(None)
    }

    /// Same as [`AppConfig::load`], reading `file` instead of `config.*` when given.
    pub fn load_from(file: Option<&Path>) -> anyhow::Result<Self> {
        let file_source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(file_source)
            // Override with environment variables (F1_SERVER__PORT, F1_DATASET__DIR, ...)
            .add_source(
                config::Environment::with_prefix("F1")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.dataset.dir, "data/f1");
        assert!(config.dataset.preload);
        assert_eq!(config.dataset.load_retries, 2);
    }

    #[test]
    fn test_sources_join_dir() {
        let config = DatasetConfig {
            dir: "/srv/f1".to_string(),
            laps_file: "/mnt/laps/lap_times_2024.csv".to_string(),
            ..Default::default()
        };

        let sources = config.sources();
        assert_eq!(sources.races, PathBuf::from("/srv/f1/races.csv"));
        assert_eq!(sources.drivers, PathBuf::from("/srv/f1/drivers.csv"));
        assert_eq!(sources.laps, PathBuf::from("/mnt/laps/lap_times_2024.csv"));
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[dataset]\ndir = \"/tmp/f1\"\npreload = false\n"
        )
        .unwrap();

        let config = AppConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.dataset.dir, "/tmp/f1");
        assert!(!config.dataset.preload);
        assert_eq!(config.dataset.races_file, "races.csv");
    }
}
