use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_dirs::AppDirs;
use crate::error::ConfigError;
use crate::theme::Theme;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Display mode at startup
    pub theme: Theme,
    /// How long the event loop waits for input before redrawing
    pub redraw_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            redraw_interval_ms: 100,
        }
    }
}

impl Config {
    pub fn redraw_interval(&self) -> Duration {
        Duration::from_millis(self.redraw_interval_ms.max(1))
    }
}

pub trait ConfigStore {
    /// A missing file is not an error and yields the defaults.
    fn load(&self) -> Result<Config, ConfigError>;

    /// Loads the config, falling back to defaults on any error.
    fn load_or_default(&self) -> Config {
        self.load().unwrap_or_else(|err| {
            tracing::warn!(%err, "config_load_failed_using_defaults");
            Config::default()
        })
    }
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<Config, ConfigError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "config_missing_using_defaults");
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        assert_eq!(store.load().unwrap(), Config::default());
    }

    #[test]
    fn load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "theme": "dark", "redraw_interval_ms": 50 }"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).load().unwrap();
        assert_eq!(cfg.theme, Theme::Dark);
        assert_eq!(cfg.redraw_interval(), Duration::from_millis(50));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "theme": "dark" }"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).load().unwrap();
        assert_eq!(cfg.theme, Theme::Dark);
        assert_eq!(cfg.redraw_interval_ms, Config::default().redraw_interval_ms);
    }

    #[test]
    fn invalid_config_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let store = FileConfigStore::with_path(&path);

        assert_matches!(store.load(), Err(ConfigError::Parse { .. }));
        assert_eq!(store.load_or_default(), Config::default());
    }

    #[test]
    fn zero_redraw_interval_is_clamped() {
        let cfg = Config {
            redraw_interval_ms: 0,
            ..Config::default()
        };
        assert_eq!(cfg.redraw_interval(), Duration::from_millis(1));
    }

    #[test]
    fn config_round_trips_through_json() {
        let cfg = Config {
            theme: Theme::Dark,
            redraw_interval_ms: 250,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(serde_json::from_str::<Config>(&json).unwrap(), cfg);
    }
}
