//! Harness configuration, read from the environment (and `.env` via dotenvy)

use std::path::PathBuf;

/// Default data directory holding the benchmark sets
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default number of timed repetitions per algorithm
pub const DEFAULT_REPEAT: usize = 1;

#[derive(Debug, Clone)]
pub struct Config {
    /// Root containing `test_set1`, `test_set2`, `ALUE`, `ALUT`, `DMXA`
    pub data_dir: PathBuf,
    /// Timed repetitions per algorithm; the fastest run is reported
    pub repeat: usize,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            repeat: DEFAULT_REPEAT,
            log_json: false,
        }
    }
}

impl Config {
    /// Read `ALGO_DATA_DIR`, `ALGO_REPEAT` and `ALGO_LOG_JSON`, falling back
    /// to defaults for unset or unparsable values
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("ALGO_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let repeat = lookup("ALGO_REPEAT")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&r| r > 0)
            .unwrap_or(defaults.repeat);

        let log_json = lookup("ALGO_LOG_JSON")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.log_json);

        Self {
            data_dir,
            repeat,
            log_json,
        }
    }

    pub fn log_config(&self) {
        tracing::info!(
            "Config: data_dir={} repeat={} log_json={}",
            self.data_dir.display(),
            self.repeat,
            self.log_json
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.repeat, 1);
        assert!(!config.log_json);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("ALGO_DATA_DIR", "/srv/steinlib"),
            ("ALGO_REPEAT", "5"),
            ("ALGO_LOG_JSON", "true"),
        ]);
        assert_eq!(config.data_dir, PathBuf::from("/srv/steinlib"));
        assert_eq!(config.repeat, 5);
        assert!(config.log_json);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[("ALGO_REPEAT", "0"), ("ALGO_DATA_DIR", " ")]);
        assert_eq!(config.repeat, 1);
        assert_eq!(config.data_dir, PathBuf::from("data"));

        let config = config_from(&[("ALGO_REPEAT", "many")]);
        assert_eq!(config.repeat, 1);
    }
}
