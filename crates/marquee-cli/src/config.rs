use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use toml_edit::{value, DocumentMut};

/// Keys accepted by `marquee config get` and `marquee config set`.
pub const KEYS: &[&str] = &["database_path", "log_level"];

/// Configuration for marquee.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (MARQUEE_* prefix)
/// 3. Config file (~/.config/marquee/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite database.
    ///
    /// Can be set via:
    /// - CLI: --db /path/to/db
    /// - ENV: MARQUEE_DATABASE_PATH
    /// - Config: database_path = "/path/to/db"
    /// - Default: ~/.local/share/marquee/marquee.db
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,

    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_db_path(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration with the database path given on the command line.
    pub fn load_with_db_path(db_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.database_path = db_path;
        Ok(config)
    }

    fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        builder
            .add_env(env::Options::with_top_level("marquee"))
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// The current value of `key` as text.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "database_path" => Ok(self.database_path.display().to_string()),
            "log_level" => Ok(self.log_level.clone()),
            _ => Err(unknown_key(key)),
        }
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("marquee")
        .join("marquee.db")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Unknown config key: {}\n\nValid keys: {}",
        key,
        KEYS.join(", ")
    )
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/marquee/config.toml
/// - macOS: ~/Library/Application Support/marquee/config.toml
/// - Windows: %APPDATA%\marquee\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("marquee")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Marquee Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (MARQUEE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Path to the SQLite database holding venues, artists and shows
#
# Can also be set via:
# - CLI: marquee --db /custom/path.db venue list
# - Environment: MARQUEE_DATABASE_PATH=/custom/path.db
#
# Default: Platform-specific data directory
#database_path = "/path/to/custom/marquee.db"

# Log filter (error, warn, info, debug, trace, or a full filter directive)
# RUST_LOG takes precedence when it is set.
log_level = "info"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

/// Set `key` to `new_value` in the TOML document `contents`, keeping
/// comments and layout of everything else.
pub fn set_value(contents: &str, key: &str, new_value: &str) -> Result<String> {
    if !KEYS.contains(&key) {
        return Err(unknown_key(key));
    }

    let mut doc: DocumentMut = contents.parse().context("Config file is not valid TOML")?;
    doc[key] = value(new_value);
    Ok(doc.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.database_path.ends_with("marquee/marquee.db"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "database_path = \"/tmp/venues.db\"\nlog_level = \"debug\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/venues.db"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.database_path, default_db_path());
    }

    #[test]
    fn test_example_config_parses() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, example_config()).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_with_custom_db_path() {
        let custom_path = PathBuf::from("/tmp/test.db");
        let config = Config::load_with_db_path(custom_path.clone()).unwrap();
        assert_eq!(config.database_path, custom_path);
    }

    #[test]
    fn test_get_known_and_unknown_keys() {
        let config = Config::default();
        assert_eq!(config.get("log_level").unwrap(), "info");
        assert!(config.get("acoustid_api_key").is_err());
    }

    #[test]
    fn test_set_value_keeps_comments() {
        let updated = set_value(example_config(), "log_level", "debug").unwrap();
        assert!(updated.contains("log_level = \"debug\""));
        assert!(updated.contains("# Marquee Configuration File"));
        assert!(!updated.contains("log_level = \"info\""));
    }

    #[test]
    fn test_set_value_adds_missing_key() {
        let updated = set_value("log_level = \"warn\"\n", "database_path", "/srv/m.db").unwrap();
        assert!(updated.contains("database_path = \"/srv/m.db\""));
        assert!(updated.contains("log_level = \"warn\""));
    }

    #[test]
    fn test_set_value_rejects_unknown_key() {
        assert!(set_value("", "colour", "blue").is_err());
    }
}
