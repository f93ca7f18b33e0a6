use std::env;
use std::path::{Path, PathBuf};

/// Storage configuration.
///
/// Reads from the `GOALPATH_DATA_DIR` environment variable, falling back to
/// the platform data directory (`~/.local/share/goalpath` on Linux) when
/// unset.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding `goals.json` and `tasks.json`.
    pub data_dir: PathBuf,
}

impl StoreConfig {
    /// Environment variable consulted by [`StoreConfig::from_env`].
    pub const ENV_VAR: &str = "GOALPATH_DATA_DIR";

    /// File name of the persisted goal collection.
    pub const GOALS_FILE: &str = "goals.json";

    /// File name of the persisted task collection.
    pub const TASKS_FILE: &str = "tasks.json";

    /// Build a config from the environment.
    ///
    /// Priority: `GOALPATH_DATA_DIR` env var, then [`StoreConfig::default_data_dir`].
    pub fn from_env() -> Self {
        let data_dir = env::var(Self::ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_data_dir());
        Self { data_dir }
    }

    /// Build a config from an explicit directory (useful for tests and CLI flags).
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Platform data directory joined with `goalpath`.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("goalpath")
    }

    pub fn goals_path(&self) -> PathBuf {
        self.data_dir.join(Self::GOALS_FILE)
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join(Self::TASKS_FILE)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_paths_live_in_data_dir() {
        let cfg = StoreConfig::new("/tmp/goalpath-test");
        assert_eq!(cfg.goals_path(), PathBuf::from("/tmp/goalpath-test/goals.json"));
        assert_eq!(cfg.tasks_path(), PathBuf::from("/tmp/goalpath-test/tasks.json"));
    }

    #[test]
    fn default_dir_ends_with_app_name() {
        assert!(StoreConfig::default_data_dir().ends_with("goalpath"));
    }
}
