//! seatsearch configuration.
//!
//! Loaded from `~/.seatsearch/config.toml`. A missing file means defaults.
//!
//! The base URL is resolved through a chain:
//!
//! 1. `--base-url <url>` — explicit per-command override
//! 2. `SEATSEARCH_BASE_URL` env var
//! 3. `base-url` in the config file
//! 4. the built-in default

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://site.ontopo.work";

const BASE_URL_ENV: &str = "SEATSEARCH_BASE_URL";

/// seatsearch configuration.
///
/// Everything except the base URL is static search context sent with
/// every search; none of it is user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Scheme and host of the reservation API, without a trailing slash.
    pub base_url: String,
    pub marketplace_id: String,
    pub locale: String,
    pub geocodes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            marketplace_id: "15380287".to_string(),
            locale: "en".to_string(),
            geocodes: vec!["belgrade".to_string()],
        }
    }
}

impl Config {
    /// Load config from `~/.seatsearch/config.toml`, then apply the
    /// base URL chain.
    pub fn load(base_url: Option<&str>) -> Result<Self, String> {
        let config = match Self::path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };

        Ok(config.resolve_base_url(base_url, env::var(BASE_URL_ENV).ok()))
    }

    /// Apply the flag and env var tiers over the loaded base URL.
    fn resolve_base_url(mut self, flag: Option<&str>, env_url: Option<String>) -> Self {
        if let Some(url) = flag {
            self.base_url = url.to_string();
        } else if let Some(url) = env_url
            && !url.is_empty()
        {
            self.base_url = url;
        }

        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self
    }

    /// Load config from a specific file. Returns defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.seatsearch/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".seatsearch").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.geocodes, vec!["belgrade"]);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "locale = \"he\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.locale, "he");
        assert_eq!(config.marketplace_id, "15380287");
    }

    #[test]
    fn full_file_overrides_everything() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "base-url = \"http://localhost:8080\"\n\
             marketplace-id = \"1\"\n\
             locale = \"sr\"\n\
             geocodes = [\"novi-sad\", \"nis\"]\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.marketplace_id, "1");
        assert_eq!(config.geocodes, vec!["novi-sad", "nis"]);
    }

    #[test]
    fn invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "geocodes = 3").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.starts_with("invalid config at"));
    }

    fn with_file_url() -> Config {
        Config {
            base_url: "http://file.example".into(),
            ..Config::default()
        }
    }

    #[test]
    fn flag_wins_and_is_trimmed() {
        let config = with_file_url()
            .resolve_base_url(Some("http://127.0.0.1:9000/"), Some("http://env.example".into()));
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn env_beats_file() {
        let config = with_file_url().resolve_base_url(None, Some("http://env.example/".into()));
        assert_eq!(config.base_url, "http://env.example");
    }

    #[test]
    fn empty_env_falls_through_to_file() {
        let config = with_file_url().resolve_base_url(None, Some(String::new()));
        assert_eq!(config.base_url, "http://file.example");
    }

    #[test]
    fn default_when_nothing_set() {
        let config = Config::default().resolve_base_url(None, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.marketplace_id, "15380287");
    }
}
