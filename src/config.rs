use crate::error::{CleanerError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct ImportConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_db_path() -> String {
    "data/species.db".to_string()
}

fn default_data_dir() -> String {
    "data/scraper".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: default_db_path() }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            import: ImportConfig::default(),
        }
    }
}

impl Config {
    /// Loads `config.toml` from the working directory. A missing file is not an
    /// error; defaults apply. The `SPECIES_DB_PATH` environment variable
    /// overrides the configured database path.
    pub fn load() -> Result<Self> {
        let config_path = "config.toml";
        let mut config = if Path::new(config_path).exists() {
            let config_content = fs::read_to_string(config_path).map_err(|e| {
                CleanerError::Config(format!("Failed to read config file '{}': {}", config_path, e))
            })?;
            toml::from_str(&config_content)?
        } else {
            Config::default()
        };

        if let Ok(path) = std::env::var("SPECIES_DB_PATH") {
            config.database.path = path;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_absent() {
        let config = Config::default();
        assert_eq!(config.database.path, "data/species.db");
        assert_eq!(config.import.data_dir, "data/scraper");
    }

    #[test]
    fn parses_partial_toml() {
        let config: Config = toml::from_str("[database]\npath = \"/tmp/test.db\"\n").unwrap();
        assert_eq!(config.database.path, "/tmp/test.db");
        assert_eq!(config.import.data_dir, "data/scraper");
    }
}
