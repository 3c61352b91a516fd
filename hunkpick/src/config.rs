//! User configuration loaded from `config.toml`.
//!
//! Every key is optional; a missing or unreadable file yields the defaults.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme name, see `Theme::from_name`.
    pub theme: String,
    /// Ref compared against HEAD in branch-comparison mode.
    pub base_branch: String,
    /// Seconds between automatic reloads of worktree/staged diffs. 0 disables.
    pub refresh_secs: u64,
    /// Default `tracing` filter when `HUNKPICK_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "catppuccin-mocha".to_owned(),
            base_branch: "main".to_owned(),
            refresh_secs: 2,
            log_level: "info".to_owned(),
        }
    }
}

impl Config {
    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Loads the config file.
    ///
    /// Returns the defaults plus a warning when the file exists but does not
    /// parse; the caller logs it once logging is up.
    pub fn load() -> (Self, Option<String>) {
        let path = config_path();
        let raw = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(_) => return (Self::default(), None),
        };
        match Self::from_toml(&raw) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(format!("config parse error in {}: {e}", path.display()))),
        }
    }

    /// Reload period for live diff modes, `None` when disabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_secs > 0).then(|| Duration::from_secs(self.refresh_secs))
    }
}

/// Returns the path to the hunkpick config file.
///
/// Prefers `$XDG_CONFIG_HOME/hunkpick/config.toml`; falls back to
/// `~/.config/hunkpick/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("hunkpick").join("config.toml")
}
