//! Query helpers over the task collection.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::models::Task;

/// Ordering used everywhere tasks are listed: date first, then `order`.
pub fn sort_schedule(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        a.scheduled_date
            .cmp(&b.scheduled_date)
            .then(a.order.cmp(&b.order))
    });
}

/// All tasks belonging to `goal_id`, in schedule order.
pub fn tasks_for_goal(tasks: &[Task], goal_id: Uuid) -> Vec<Task> {
    let mut out: Vec<Task> = tasks
        .iter()
        .filter(|t| t.goal_id == goal_id)
        .cloned()
        .collect();
    sort_schedule(&mut out);
    out
}

/// Tasks scheduled on exactly `date`, in schedule order.
pub fn tasks_on(tasks: &[Task], date: NaiveDate) -> Vec<Task> {
    let mut out: Vec<Task> = tasks
        .iter()
        .filter(|t| t.scheduled_date == date)
        .cloned()
        .collect();
    sort_schedule(&mut out);
    out
}

/// Incomplete tasks scheduled strictly before `today`.
pub fn overdue_tasks(tasks: &[Task], today: NaiveDate) -> Vec<Task> {
    let mut out: Vec<Task> = tasks
        .iter()
        .filter(|t| !t.completed && t.scheduled_date < today)
        .cloned()
        .collect();
    sort_schedule(&mut out);
    out
}

/// Incomplete tasks in the half-open window `(today, today + days]`.
pub fn upcoming_tasks(tasks: &[Task], today: NaiveDate, days: u32) -> Vec<Task> {
    let horizon = today
        .checked_add_days(chrono::Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX);
    let mut out: Vec<Task> = tasks
        .iter()
        .filter(|t| !t.completed && t.scheduled_date > today && t.scheduled_date <= horizon)
        .cloned()
        .collect();
    sort_schedule(&mut out);
    out
}

/// Completion counts for a goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    pub total: u32,
    pub completed: u32,
    pub minutes_total: u32,
    pub minutes_completed: u32,
}

impl GoalProgress {
    /// Completed share of tasks as a whole percentage (0 for an empty plan).
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            self.completed * 100 / self.total
        }
    }

    pub fn is_finished(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Count tasks and minutes for `goal_id`. Minute totals saturate.
pub fn goal_progress(tasks: &[Task], goal_id: Uuid) -> GoalProgress {
    let mut progress = GoalProgress::default();
    for task in tasks.iter().filter(|t| t.goal_id == goal_id) {
        progress.total += 1;
        progress.minutes_total = progress.minutes_total.saturating_add(task.estimated_time_minutes);
        if task.completed {
            progress.completed += 1;
            progress.minutes_completed = progress
                .minutes_completed
                .saturating_add(task.estimated_time_minutes);
        }
    }
    progress
}
