//! Configuration file management for goalpath.
//!
//! Provides a TOML-based config file at `~/.config/goalpath/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use goalpath_core::analysis::http::DEFAULT_TIMEOUT;
use goalpath_core::plan::GenerationOptions;
use goalpath_store::config::StoreConfig;

/// Environment variable naming the plan service endpoint.
pub const AI_ENDPOINT_ENV: &str = "GOALPATH_AI_ENDPOINT";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub storage: StorageSection,
    pub ai: AiSection,
    pub planning: GenerationOptions,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSection {
    /// Full URL of the plan endpoint, e.g. `http://localhost:3001/generate-plan`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for AiSection {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the goalpath config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/goalpath` or `~/.config/goalpath`,
/// ignoring the platform-specific `dirs::config_dir()`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("goalpath");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("goalpath")
}

/// Return the path to the goalpath config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Parse the config file at `path`. `Ok(None)` when it does not exist.
pub fn load_config_from(path: &Path) -> Result<Option<ConfigFile>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("failed to read config file at {}", path.display()));
        }
    };
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(Some(config))
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config_to(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }
    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct GoalpathConfig {
    pub store_config: StoreConfig,
    /// `None` means no plan service: analysis runs locally.
    pub ai_endpoint: Option<String>,
    pub ai_timeout: Duration,
    pub planning: GenerationOptions,
}

impl GoalpathConfig {
    /// Resolve configuration from the default config file location.
    pub fn resolve(cli_data_dir: Option<&Path>, cli_ai_endpoint: Option<&str>) -> Result<Self> {
        Self::resolve_with(&config_path(), cli_data_dir, cli_ai_endpoint)
    }

    /// Resolve using the chain: CLI flag > env var > config file > default.
    ///
    /// - Data dir: `--data-dir` > `GOALPATH_DATA_DIR` > `storage.data_dir` > platform data dir
    /// - Plan endpoint: `--ai-endpoint` > `GOALPATH_AI_ENDPOINT` > `ai.endpoint` > none
    /// - Planning defaults and timeout come from the file only.
    pub fn resolve_with(
        path: &Path,
        cli_data_dir: Option<&Path>,
        cli_ai_endpoint: Option<&str>,
    ) -> Result<Self> {
        let file = load_config_from(path)?.unwrap_or_default();

        let data_dir = if let Some(dir) = cli_data_dir {
            dir.to_path_buf()
        } else if let Some(dir) = non_empty_env(StoreConfig::ENV_VAR) {
            PathBuf::from(dir)
        } else if let Some(dir) = file.storage.data_dir {
            dir
        } else {
            StoreConfig::default_data_dir()
        };

        let ai_endpoint = cli_ai_endpoint
            .map(str::to_string)
            .or_else(|| non_empty_env(AI_ENDPOINT_ENV))
            .or(file.ai.endpoint)
            .filter(|e| !e.trim().is_empty());

        Ok(Self {
            store_config: StoreConfig::new(data_dir),
            ai_endpoint,
            ai_timeout: Duration::from_secs(file.ai.timeout_secs.max(1)),
            planning: file.planning,
        })
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        crate::test_util::lock_env()
    }

    fn clear_env() {
        unsafe { std::env::remove_var(StoreConfig::ENV_VAR) };
        unsafe { std::env::remove_var(AI_ENDPOINT_ENV) };
    }

    fn write_file(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("config.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn save_and_load_config_roundtrip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("goalpath").join("config.toml");

        let saved = ConfigFile {
            storage: StorageSection {
                data_dir: Some(PathBuf::from("/srv/goals")),
            },
            ai: AiSection {
                endpoint: Some("http://localhost:3001/generate-plan".to_string()),
                timeout_secs: 10,
            },
            planning: GenerationOptions::default().with_milestones(5),
        };
        save_config_to(&path, &saved).unwrap();

        let loaded = load_config_from(&path).unwrap().unwrap();
        assert_eq!(loaded.storage.data_dir, saved.storage.data_dir);
        assert_eq!(loaded.ai.endpoint, saved.ai.endpoint);
        assert_eq!(loaded.ai.timeout_secs, 10);
        assert_eq!(loaded.planning, saved.planning);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(load_config_from(&tmp.path().join("nope.toml")).unwrap().is_none());
    }

    #[test]
    fn broken_file_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_file(tmp.path(), "[storage\ndata_dir = 3");
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn resolve_with_cli_flag_overrides_all() {
        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_file(
            tmp.path(),
            "[storage]\ndata_dir = \"/from/file\"\n[ai]\nendpoint = \"http://file\"\n",
        );

        unsafe { std::env::set_var(StoreConfig::ENV_VAR, "/from/env") };
        unsafe { std::env::set_var(AI_ENDPOINT_ENV, "http://env") };

        let config =
            GoalpathConfig::resolve_with(&path, Some(Path::new("/from/cli")), Some("http://cli"))
                .unwrap();
        clear_env();

        assert_eq!(config.store_config.data_dir, PathBuf::from("/from/cli"));
        assert_eq!(config.ai_endpoint.as_deref(), Some("http://cli"));
    }

    #[test]
    fn resolve_with_env_var_overrides_config_file() {
        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_file(
            tmp.path(),
            "[storage]\ndata_dir = \"/from/file\"\n[ai]\nendpoint = \"http://file\"\n",
        );

        unsafe { std::env::set_var(StoreConfig::ENV_VAR, "/from/env") };
        unsafe { std::env::set_var(AI_ENDPOINT_ENV, "http://env") };

        let config = GoalpathConfig::resolve_with(&path, None, None).unwrap();
        clear_env();

        assert_eq!(config.store_config.data_dir, PathBuf::from("/from/env"));
        assert_eq!(config.ai_endpoint.as_deref(), Some("http://env"));
    }

    #[test]
    fn resolve_reads_file_sections() {
        let _lock = lock_env();
        clear_env();
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_file(
            tmp.path(),
            "[storage]\ndata_dir = \"/from/file\"\n\
             [ai]\ntimeout_secs = 7\n\
             [planning]\nauto_adjust_for_weekends = true\n",
        );

        let config = GoalpathConfig::resolve_with(&path, None, None).unwrap();
        assert_eq!(config.store_config.data_dir, PathBuf::from("/from/file"));
        assert_eq!(config.ai_endpoint, None);
        assert_eq!(config.ai_timeout, Duration::from_secs(7));
        assert!(config.planning.auto_adjust_for_weekends);
        assert!(!config.planning.include_milestones);
    }

    #[test]
    fn resolve_defaults_when_nothing_set() {
        let _lock = lock_env();
        clear_env();
        let tmp = tempfile::TempDir::new().unwrap();

        let config =
            GoalpathConfig::resolve_with(&tmp.path().join("absent.toml"), None, None).unwrap();
        assert_eq!(config.store_config.data_dir, StoreConfig::default_data_dir());
        assert_eq!(config.ai_endpoint, None);
        assert_eq!(config.ai_timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.planning, GenerationOptions::default());
    }

    #[test]
    fn config_path_ends_with_expected_filename() {
        let path = config_path();
        assert!(
            path.ends_with("goalpath/config.toml"),
            "unexpected config path: {}",
            path.display()
        );
    }
}
