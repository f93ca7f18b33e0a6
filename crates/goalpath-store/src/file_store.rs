//! JSON-file backed [`StateStore`].
//!
//! Goals and tasks live in two pretty-printed JSON arrays inside the data
//! directory. Writes go to a sibling `.tmp` file first and are renamed into
//! place, so a crash mid-write leaves the previous file intact. There is no
//! cross-process locking: two writers race and the last rename wins.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::models::{Goal, Task};
use crate::store::{StateStore, StoreError};

/// Persist goals and tasks as JSON files under a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    goals_path: PathBuf,
    tasks_path: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `config.data_dir`, creating the directory if
    /// necessary. Missing files are treated as empty collections.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let dir = config.data_dir();
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.display().to_string(),
                source,
            })?;
            info!(dir = %dir.display(), "created data directory");
        }
        Ok(Self {
            goals_path: config.goals_path(),
            tasks_path: config.tasks_path(),
        })
    }

    pub fn goals_path(&self) -> &Path {
        &self.goals_path
    }

    pub fn tasks_path(&self) -> &Path {
        &self.tasks_path
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.display().to_string(),
                source,
            });
        }
    };

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
        path: path.display().to_string(),
        source,
    })
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + use<> {
    let path = path.display().to_string();
    move |source| StoreError::Io { path, source }
}

fn write_collection<T: Serialize>(
    path: &Path,
    what: &'static str,
    items: &[T],
) -> Result<(), StoreError> {
    let contents =
        serde_json::to_string_pretty(items).map_err(|source| StoreError::Serialize { what, source })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).map_err(io_error(&tmp))?;
    fs::rename(&tmp, path).map_err(io_error(path))?;

    debug!(path = %path.display(), count = items.len(), "wrote {what}");
    Ok(())
}

impl StateStore for JsonFileStore {
    fn save_goals(&self, goals: &[Goal]) -> Result<(), StoreError> {
        write_collection(&self.goals_path, "goals", goals)
    }

    fn get_goals(&self) -> Result<Vec<Goal>, StoreError> {
        read_collection(&self.goals_path)
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<(), StoreError> {
        write_collection(&self.tasks_path, "tasks", tasks)
    }

    fn get_tasks(&self) -> Result<Vec<Task>, StoreError> {
        read_collection(&self.tasks_path)
    }
}
