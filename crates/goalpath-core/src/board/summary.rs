//! Dashboard roll-ups over the whole board.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use goalpath_store::models::{Goal, GoalStatus, Task};

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_goals: usize,
    pub active_goals: usize,
    pub completed_goals: usize,
    pub paused_goals: usize,
    pub today_total: usize,
    pub today_completed: usize,
    /// Minutes still to do today.
    pub today_minutes_remaining: u32,
    pub overdue: usize,
    pub streak_days: u32,
    /// Share of all tasks completed, 0-100.
    pub completion_percent: u32,
}

pub fn dashboard_summary(goals: &[Goal], tasks: &[Task], today: NaiveDate) -> DashboardSummary {
    let count_status = |s: GoalStatus| goals.iter().filter(|g| g.status == s).count();

    let todays: Vec<&Task> = tasks.iter().filter(|t| t.scheduled_date == today).collect();
    let completed = tasks.iter().filter(|t| t.completed).count();

    DashboardSummary {
        total_goals: goals.len(),
        active_goals: count_status(GoalStatus::Active),
        completed_goals: count_status(GoalStatus::Completed),
        paused_goals: count_status(GoalStatus::Paused),
        today_total: todays.len(),
        today_completed: todays.iter().filter(|t| t.completed).count(),
        today_minutes_remaining: todays
            .iter()
            .filter(|t| !t.completed)
            .fold(0u32, |acc, t| acc.saturating_add(t.estimated_time_minutes)),
        overdue: tasks
            .iter()
            .filter(|t| !t.completed && t.scheduled_date < today)
            .count(),
        streak_days: completion_streak(tasks, today),
        completion_percent: if tasks.is_empty() {
            0
        } else {
            (completed * 100 / tasks.len()) as u32
        },
    }
}

/// Consecutive scheduled days, counting back from `today`, on which every
/// task was completed.
///
/// Days with nothing scheduled are skipped. An unfinished `today` does not
/// break the streak since the day is not over yet.
pub fn completion_streak(tasks: &[Task], today: NaiveDate) -> u32 {
    let mut days: BTreeMap<NaiveDate, bool> = BTreeMap::new();
    for task in tasks.iter().filter(|t| t.scheduled_date <= today) {
        let all_done = days.entry(task.scheduled_date).or_insert(true);
        *all_done &= task.completed;
    }

    let mut streak = 0;
    for (date, all_done) in days.iter().rev() {
        match (*all_done, *date == today) {
            (true, _) => streak += 1,
            (false, true) => continue,
            (false, false) => break,
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use goalpath_store::models::TaskCategory;
    use uuid::Uuid;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
    }

    fn task(day: u32, completed: bool) -> Task {
        Task {
            id: Uuid::new_v4(),
            goal_id: Uuid::nil(),
            title: format!("t{day}"),
            description: None,
            scheduled_date: d(day),
            estimated_time_minutes: 15,
            completed,
            completed_at: None,
            order: 0,
            category: TaskCategory::Daily,
        }
    }

    #[test]
    fn streak_skips_empty_days_and_open_today() {
        let tasks = vec![
            task(1, false),
            task(2, true),
            task(4, true),
            task(4, true),
            task(6, false),
        ];
        // Day 6 is today and still open; 4 and 2 are complete; 3 and 5 are empty.
        assert_eq!(completion_streak(&tasks, d(6)), 2);
    }

    #[test]
    fn partially_done_day_breaks_streak() {
        let tasks = vec![task(2, true), task(3, true), task(3, false), task(4, true)];
        assert_eq!(completion_streak(&tasks, d(4)), 1);
    }

    #[test]
    fn future_tasks_do_not_count() {
        let tasks = vec![task(1, true), task(9, true)];
        assert_eq!(completion_streak(&tasks, d(2)), 1);
    }

    #[test]
    fn summary_counts_today_and_overdue() {
        let tasks = vec![task(1, false), task(2, true), task(2, false), task(3, false)];
        let s = dashboard_summary(&[], &tasks, d(2));
        assert_eq!(s.today_total, 2);
        assert_eq!(s.today_completed, 1);
        assert_eq!(s.today_minutes_remaining, 15);
        assert_eq!(s.overdue, 1);
        assert_eq!(s.completion_percent, 25);
    }
}
