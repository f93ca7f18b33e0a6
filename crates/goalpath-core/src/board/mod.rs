//! The in-memory goal board backed by an injected [`StateStore`].
//!
//! The board owns the authoritative goal and task collections for a session.
//! Every mutation writes both collections through the store. A failed write
//! does not roll back the mutation; it is logged and kept as a
//! [`PersistenceNotice`] for the caller to surface.

pub mod summary;

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use goalpath_store::models::{Goal, GoalStatus, Priority, Task};
use goalpath_store::queries::goals::{LookupError, resolve_goal_id, resolve_id};
use goalpath_store::queries::tasks::{self, GoalProgress};
use goalpath_store::store::{StateStore, StoreError};

use crate::plan::{GenerationOptions, PlanError, generate_plan, update_plan};
use crate::strategy::MINUTES_PER_DAY;

pub use summary::{DashboardSummary, completion_streak, dashboard_summary};

// ---------------------------------------------------------------------------
// Errors and notices
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("goal {0} not found")]
    GoalNotFound(Uuid),

    #[error("task {0} not found")]
    TaskNotFound(Uuid),

    #[error("task {task_id} references unknown goal {goal_id}")]
    OrphanTask { task_id: Uuid, goal_id: Uuid },

    #[error("goal title must not be empty")]
    EmptyTitle,

    #[error("end date {end} is before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("daily time of {0} minutes does not fit in a day")]
    DailyTimeTooLong(u32),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("failed to load saved state: {0}")]
    Store(#[from] StoreError),
}

/// A write that did not reach the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceNotice {
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Partial edit of a goal. `None` fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct GoalUpdate {
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub estimated_daily_time_minutes: Option<u32>,
    pub priority: Option<Priority>,
    pub status: Option<GoalStatus>,
    pub tags: Option<Vec<String>>,
}

impl GoalUpdate {
    fn apply(self, goal: &mut Goal) {
        if let Some(title) = self.title {
            goal.title = title;
        }
        if let Some(description) = self.description {
            goal.description = description;
        }
        if let Some(start) = self.start_date {
            goal.start_date = start;
        }
        if let Some(end) = self.end_date {
            goal.end_date = end;
        }
        if let Some(minutes) = self.estimated_daily_time_minutes {
            goal.estimated_daily_time_minutes = minutes;
        }
        if let Some(priority) = self.priority {
            goal.priority = priority;
        }
        if let Some(status) = self.status {
            goal.status = status;
        }
        if let Some(tags) = self.tags {
            goal.tags = tags;
        }
    }
}

fn check_goal(goal: &Goal) -> Result<(), BoardError> {
    if goal.title.trim().is_empty() {
        return Err(BoardError::EmptyTitle);
    }
    if goal.end_date < goal.start_date {
        return Err(BoardError::InvalidDateRange {
            start: goal.start_date,
            end: goal.end_date,
        });
    }
    if goal.estimated_daily_time_minutes > MINUTES_PER_DAY {
        return Err(BoardError::DailyTimeTooLong(goal.estimated_daily_time_minutes));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GoalBoard
// ---------------------------------------------------------------------------

pub struct GoalBoard {
    store: Box<dyn StateStore>,
    goals: Vec<Goal>,
    tasks: Vec<Task>,
    notice: Option<PersistenceNotice>,
}

impl GoalBoard {
    /// Rehydrate the board from `store`.
    ///
    /// Unlike writes, a failed read is an error: continuing with an empty
    /// board would overwrite the saved state on the next mutation.
    pub fn load(store: Box<dyn StateStore>) -> Result<Self, BoardError> {
        let goals = store.get_goals()?;
        let tasks = store.get_tasks()?;
        info!(goals = goals.len(), tasks = tasks.len(), "board loaded");
        Ok(Self {
            store,
            goals,
            tasks,
            notice: None,
        })
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn goal(&self, id: Uuid) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Resolve a full id or unique prefix to a goal.
    pub fn resolve_goal(&self, input: &str) -> Result<&Goal, BoardError> {
        let id = resolve_goal_id(&self.goals, input)?;
        self.goal(id).ok_or(BoardError::GoalNotFound(id))
    }

    /// Resolve a full id or unique prefix to a task.
    pub fn resolve_task(&self, input: &str) -> Result<&Task, BoardError> {
        let id = resolve_id(self.tasks.iter().map(|t| t.id), input, "task")?;
        self.task(id).ok_or(BoardError::TaskNotFound(id))
    }

    /// The last unsaved-write notice, if any. Clears it.
    pub fn take_notice(&mut self) -> Option<PersistenceNotice> {
        self.notice.take()
    }

    // -- goals --------------------------------------------------------------

    /// Add `goal`, generating its plan when `options` is given.
    ///
    /// Plan errors leave the board unchanged.
    pub fn create_goal(
        &mut self,
        goal: Goal,
        options: Option<&GenerationOptions>,
    ) -> Result<Uuid, BoardError> {
        check_goal(&goal)?;
        let plan = match options {
            Some(opts) => generate_plan(&goal, opts)?,
            None => Vec::new(),
        };

        let id = goal.id;
        info!(goal_id = %id, title = %goal.title, tasks = plan.len(), "goal created");
        self.goals.push(goal);
        self.tasks.extend(plan);
        self.persist();
        Ok(id)
    }

    /// Add a goal together with an already built task list, e.g. from an
    /// accepted strategy. Every task must belong to `goal`.
    pub fn add_goal_with_tasks(&mut self, goal: Goal, tasks: Vec<Task>) -> Result<Uuid, BoardError> {
        check_goal(&goal)?;
        if let Some(stray) = tasks.iter().find(|t| t.goal_id != goal.id) {
            return Err(BoardError::OrphanTask {
                task_id: stray.id,
                goal_id: stray.goal_id,
            });
        }

        let id = goal.id;
        info!(goal_id = %id, title = %goal.title, tasks = tasks.len(), "goal added with plan");
        self.goals.push(goal);
        self.tasks.extend(tasks);
        self.persist();
        Ok(id)
    }

    /// Edit a goal. With `regenerate`, its tasks are replaced by a fresh
    /// plan built from the edited goal.
    pub fn update_goal(
        &mut self,
        id: Uuid,
        update: GoalUpdate,
        regenerate: Option<&GenerationOptions>,
    ) -> Result<&Goal, BoardError> {
        let index = self.goal_index(id)?;
        let mut edited = self.goals[index].clone();
        update.apply(&mut edited);
        edited.updated_at = Utc::now();
        check_goal(&edited)?;

        if let Some(opts) = regenerate {
            self.tasks = update_plan(&edited, &self.tasks, opts)?;
        }
        self.goals[index] = edited;
        info!(goal_id = %id, regenerated = regenerate.is_some(), "goal updated");
        self.persist();
        Ok(&self.goals[index])
    }

    pub fn set_goal_status(&mut self, id: Uuid, status: GoalStatus) -> Result<(), BoardError> {
        let index = self.goal_index(id)?;
        let goal = &mut self.goals[index];
        goal.status = status;
        goal.updated_at = Utc::now();
        info!(goal_id = %id, %status, "goal status changed");
        self.persist();
        Ok(())
    }

    /// Delete a goal and every task that belongs to it. Returns the number
    /// of tasks removed.
    pub fn delete_goal(&mut self, id: Uuid) -> Result<usize, BoardError> {
        let index = self.goal_index(id)?;
        self.goals.remove(index);
        let before = self.tasks.len();
        self.tasks.retain(|t| t.goal_id != id);
        let removed = before - self.tasks.len();
        info!(goal_id = %id, tasks_removed = removed, "goal deleted");
        self.persist();
        Ok(removed)
    }

    /// Replace a goal's tasks with a freshly generated plan. Completion
    /// state of the old tasks is discarded. Returns the new task count.
    pub fn regenerate_plan(
        &mut self,
        id: Uuid,
        options: &GenerationOptions,
    ) -> Result<usize, BoardError> {
        let index = self.goal_index(id)?;
        self.tasks = update_plan(&self.goals[index], &self.tasks, options)?;
        let count = self.tasks.iter().filter(|t| t.goal_id == id).count();
        info!(goal_id = %id, tasks = count, "plan regenerated");
        self.persist();
        Ok(count)
    }

    // -- tasks --------------------------------------------------------------

    /// Append tasks to existing goals. Rejects the whole batch if any task
    /// references a goal that is not on the board.
    pub fn add_tasks(&mut self, tasks: Vec<Task>) -> Result<usize, BoardError> {
        if let Some(orphan) = tasks.iter().find(|t| self.goal(t.goal_id).is_none()) {
            return Err(BoardError::OrphanTask {
                task_id: orphan.id,
                goal_id: orphan.goal_id,
            });
        }
        let added = tasks.len();
        self.tasks.extend(tasks);
        self.persist();
        Ok(added)
    }

    /// Set a task's completion flag, stamping or clearing `completed_at`.
    pub fn set_task_completed(&mut self, id: Uuid, completed: bool) -> Result<&Task, BoardError> {
        let index = self.task_index(id)?;
        let task = &mut self.tasks[index];
        if task.completed != completed {
            task.completed = completed;
            task.completed_at = completed.then(Utc::now);
            info!(task_id = %id, completed, "task updated");
            self.persist();
        }
        Ok(&self.tasks[index])
    }

    /// Flip a task's completion flag. Returns the new value.
    pub fn toggle_task(&mut self, id: Uuid) -> Result<bool, BoardError> {
        let current = self.task(id).ok_or(BoardError::TaskNotFound(id))?.completed;
        Ok(self.set_task_completed(id, !current)?.completed)
    }

    pub fn delete_task(&mut self, id: Uuid) -> Result<(), BoardError> {
        let index = self.task_index(id)?;
        self.tasks.remove(index);
        info!(task_id = %id, "task deleted");
        self.persist();
        Ok(())
    }

    // -- views --------------------------------------------------------------

    pub fn tasks_for_goal(&self, goal_id: Uuid) -> Vec<Task> {
        tasks::tasks_for_goal(&self.tasks, goal_id)
    }

    pub fn tasks_on(&self, date: NaiveDate) -> Vec<Task> {
        tasks::tasks_on(&self.tasks, date)
    }

    pub fn today_tasks(&self, today: NaiveDate) -> Vec<Task> {
        self.tasks_on(today)
    }

    pub fn overdue_tasks(&self, today: NaiveDate) -> Vec<Task> {
        tasks::overdue_tasks(&self.tasks, today)
    }

    pub fn upcoming_tasks(&self, today: NaiveDate, days: u32) -> Vec<Task> {
        tasks::upcoming_tasks(&self.tasks, today, days)
    }

    pub fn goal_progress(&self, goal_id: Uuid) -> GoalProgress {
        tasks::goal_progress(&self.tasks, goal_id)
    }

    pub fn dashboard_summary(&self, today: NaiveDate) -> DashboardSummary {
        dashboard_summary(&self.goals, &self.tasks, today)
    }

    // -- internals ----------------------------------------------------------

    fn goal_index(&self, id: Uuid) -> Result<usize, BoardError> {
        self.goals
            .iter()
            .position(|g| g.id == id)
            .ok_or(BoardError::GoalNotFound(id))
    }

    fn task_index(&self, id: Uuid) -> Result<usize, BoardError> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(BoardError::TaskNotFound(id))
    }

    fn persist(&mut self) {
        let result = self
            .store
            .save_goals(&self.goals)
            .and_then(|()| self.store.save_tasks(&self.tasks));

        if let Err(e) = result {
            warn!(error = %e, "failed to save board; changes are kept in memory only");
            self.notice = Some(PersistenceNotice {
                message: e.to_string(),
                at: Utc::now(),
            });
        }
    }
}
