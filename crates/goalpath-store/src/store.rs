//! The persistence port.
//!
//! [`StateStore`] is the seam between the in-memory goal board and whatever
//! keeps goals and tasks across sessions. The trait is object-safe so the
//! board can hold a `Box<dyn StateStore>`.

use std::sync::Mutex;

use thiserror::Error;

use crate::models::{Goal, Task};

/// Errors raised by a [`StateStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt data in {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("store lock poisoned")]
    Poisoned,
}

/// Load/save operations for the two persisted collections.
///
/// Saves replace the whole collection. Date fields round-trip as ISO-8601
/// strings.
pub trait StateStore: Send + Sync {
    fn save_goals(&self, goals: &[Goal]) -> Result<(), StoreError>;

    fn get_goals(&self) -> Result<Vec<Goal>, StoreError>;

    fn save_tasks(&self, tasks: &[Task]) -> Result<(), StoreError>;

    fn get_tasks(&self) -> Result<Vec<Task>, StoreError>;
}

const _: () = {
    fn _assert_object_safe(_: &dyn StateStore) {}
};

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

/// A [`StateStore`] that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    goals: Mutex<Vec<Goal>>,
    tasks: Mutex<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store, e.g. to simulate a previous session.
    pub fn with_state(goals: Vec<Goal>, tasks: Vec<Task>) -> Self {
        Self {
            goals: Mutex::new(goals),
            tasks: Mutex::new(tasks),
        }
    }
}

impl StateStore for MemoryStore {
    fn save_goals(&self, goals: &[Goal]) -> Result<(), StoreError> {
        let mut guard = self.goals.lock().map_err(|_| StoreError::Poisoned)?;
        *guard = goals.to_vec();
        Ok(())
    }

    fn get_goals(&self) -> Result<Vec<Goal>, StoreError> {
        let guard = self.goals.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.clone())
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let mut guard = self.tasks.lock().map_err(|_| StoreError::Poisoned)?;
        *guard = tasks.to_vec();
        Ok(())
    }

    fn get_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let guard = self.tasks.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.clone())
    }
}
