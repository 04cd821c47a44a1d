//! TOML-based configuration for the control panel.
//!
//! Reads `AppConfig` from `~/.config/vaio-control/config.toml` (or
//! `$XDG_CONFIG_HOME/vaio-control/config.toml` when set).  The file is
//! optional: without it the panel talks to the standard `sony-laptop`
//! directory and logs at `info` level.
//!
//! ```toml
//! [panel]
//! log_level = "debug"
//!
//! [sysfs]
//! root = "/sys/devices/platform/sony-laptop"
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file, so a config
//! that only sets `log_level` still gets the default sysfs root.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vaio_core::DEFAULT_PLATFORM_DIR;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// `create_config_to` found a file already in place.
    #[error("config file {0} already exists")]
    AlreadyExists(PathBuf),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub panel: PanelConfig,
    #[serde(default)]
    pub sysfs: SysfsConfig,
}

/// Front-end behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PanelConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    /// `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Where the attribute files live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SysfsConfig {
    #[serde(default = "default_sysfs_root")]
    pub root: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_sysfs_root() -> PathBuf {
    PathBuf::from(DEFAULT_PLATFORM_DIR)
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for SysfsConfig {
    fn default() -> Self {
        Self {
            root: default_sysfs_root(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the default path of the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when neither
/// `XDG_CONFIG_HOME` nor `HOME` is set.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok_or(ConfigError::NoPlatformConfigDir)?;
    Ok(base.join("vaio-control").join("config.toml"))
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Persists `config` to `path`, creating the parent directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Like [`save_config_to`], but leaves an existing file untouched.
///
/// # Errors
///
/// Returns [`ConfigError::AlreadyExists`] if `path` exists, otherwise the
/// errors of [`save_config_to`].
pub fn create_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    save_config_to(path, config)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("vaio_config_{}", Uuid::new_v4()))
    }

    #[test]
    fn test_default_config_points_at_sony_laptop_driver() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.sysfs.root, PathBuf::from("/sys/devices/platform/sony-laptop"));
        assert_eq!(cfg.panel.log_level, "info");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").expect("deserialize empty");
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides_only_given_fields() {
        // Arrange
        let toml_str = r#"
[panel]
log_level = "debug"
"#;

        // Act
        let cfg: AppConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.panel.log_level, "debug");
        assert_eq!(cfg.sysfs, SysfsConfig::default());
    }

    #[test]
    fn test_invalid_toml_returns_parse_error() {
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        let result = load_config_from(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_config_returns_default_when_file_absent() {
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/config.toml");

        let cfg = load_config_from(&path).expect("missing file is not an error");

        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_save_creates_directory_and_load_reads_it_back() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join("nested").join("config.toml");
        let mut cfg = AppConfig::default();
        cfg.sysfs.root = PathBuf::from("/tmp/fake-sony");
        cfg.panel.log_level = "trace".to_string();

        // Act
        save_config_to(&path, &cfg).expect("save");
        let loaded = load_config_from(&path).expect("load");

        // Assert
        assert_eq!(loaded, cfg);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_create_refuses_to_replace_existing_file() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join("config.toml");
        create_config_to(&path, &AppConfig::default()).expect("first create");
        let mut changed = AppConfig::default();
        changed.panel.log_level = "debug".to_string();

        // Act
        let result = create_config_to(&path, &changed);

        // Assert
        assert!(matches!(result, Err(ConfigError::AlreadyExists(ref p)) if *p == path));
        assert_eq!(load_config_from(&path).expect("load"), AppConfig::default());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_config_file_path_ends_with_app_directory() {
        // May be NoPlatformConfigDir in a stripped CI environment; that is acceptable.
        if let Ok(path) = config_file_path() {
            assert!(path.ends_with("vaio-control/config.toml"), "got {path:?}");
        }
    }
}
