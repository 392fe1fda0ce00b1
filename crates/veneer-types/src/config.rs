//! Host configuration (`veneer.toml`).
//!
//! Every field has a default, so an empty or missing file is valid.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, VeneerError};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "VENEER_CONFIG";

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "veneer.toml";

/// Startup configuration for a skinned host window.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VeneerConfig {
    /// Layout document applied at startup.
    pub layout_path: PathBuf,
    /// Compiled-in window caption, used when the layout sets none.
    pub window_title: String,
    /// Compiled-in client width.
    pub client_width: i32,
    /// Compiled-in client height.
    pub client_height: i32,
    /// Period of the host blink timer in milliseconds.
    pub blink_interval_ms: u64,
}

impl Default for VeneerConfig {
    fn default() -> Self {
        Self {
            layout_path: PathBuf::from("layout/launcher.layout.xml"),
            window_title: "Launcher".to_string(),
            client_width: 960,
            client_height: 540,
            blink_interval_ms: 600,
        }
    }
}

impl VeneerConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| VeneerError::Config(format!("{CONFIG_FILE}: {e}")))
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {} -- using defaults", path.display());
                Ok(Self::default())
            },
            Err(e) => Err(VeneerError::Config(format!("{}: {e}", path.display()))),
        }
    }

    /// Resolve the config location from `VENEER_CONFIG` or the default name.
    pub fn locate() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let cfg = VeneerConfig::from_toml("").unwrap();
        assert_eq!(cfg, VeneerConfig::default());
        assert_eq!(cfg.blink_interval_ms, 600);
        assert_eq!((cfg.client_width, cfg.client_height), (960, 540));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg = VeneerConfig::from_toml(
            r#"
layout_path = "skins/dark/main.layout.xml"
blink_interval_ms = 250
"#,
        )
        .unwrap();
        assert_eq!(cfg.layout_path, PathBuf::from("skins/dark/main.layout.xml"));
        assert_eq!(cfg.blink_interval_ms, 250);
        assert_eq!(cfg.window_title, "Launcher");
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = VeneerConfig::from_toml("client_width = \"wide\"").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("config error"));
        assert!(msg.contains(CONFIG_FILE));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = VeneerConfig::load(Path::new("/nonexistent/veneer.toml")).unwrap();
        assert_eq!(cfg, VeneerConfig::default());
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "window_title = \"Demo\"\n").unwrap();
        let cfg = VeneerConfig::load(&path).unwrap();
        assert_eq!(cfg.window_title, "Demo");
    }
}
