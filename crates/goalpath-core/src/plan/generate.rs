//! Calendar plan generation.
//!
//! Turns a [`Goal`] and [`GenerationOptions`] into a dated task list:
//!
//! 1. Collect the goal's available dates (inclusive range, minus weekends
//!    and rest days as configured).
//! 2. Emit one daily task per available date.
//! 3. Optionally emit a milestone review every `milestone_frequency` dates.
//! 4. Sort by date, then `order`.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use goalpath_store::models::{Goal, Task, TaskCategory};
use goalpath_store::queries::tasks::sort_schedule;

use super::options::GenerationOptions;
use crate::calendar;
use crate::strategy::MAX_TIMEFRAME_DAYS;

/// Milestone tasks sort after every daily task sharing their date.
pub const MILESTONE_ORDER_OFFSET: u32 = 1000;

/// Errors from plan generation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("cannot schedule: no valid days in range {start}..={end}")]
    NoSchedulableDates { start: NaiveDate, end: NaiveDate },

    #[error("goal {0:?} has no daily time budget (estimated minutes must be > 0)")]
    NoDailyTime(String),

    #[error("milestone frequency must be at least 1 when milestones are enabled")]
    InvalidMilestoneFrequency,

    #[error("range {start}..={end} spans {days} days, more than the {MAX_TIMEFRAME_DAYS}-day limit")]
    RangeTooLong {
        start: NaiveDate,
        end: NaiveDate,
        days: u64,
    },

    #[error("day {day} is past the end of the calendar when starting from {start}")]
    DateOutOfRange { start: NaiveDate, day: u32 },
}

/// Dates on which work for `goal` may be scheduled under `options`.
///
/// Break days are positional: after weekend removal, every
/// `(break_day_frequency + 1)`-th remaining date is dropped. The filter does
/// not re-check weekdays after earlier removals.
pub fn available_dates(goal: &Goal, options: &GenerationOptions) -> Vec<NaiveDate> {
    let mut dates = calendar::date_range(goal.start_date, goal.end_date);

    if options.auto_adjust_for_weekends {
        dates.retain(|d| !calendar::is_weekend(*d));
    }

    if options.include_break_days && options.break_day_frequency > 0 {
        let cycle = options.break_day_frequency as usize + 1;
        dates = dates
            .into_iter()
            .enumerate()
            .filter(|(i, _)| (i + 1) % cycle != 0)
            .map(|(_, d)| d)
            .collect();
    }

    dates
}

/// Generate the full task list for `goal`.
///
/// Fails with [`PlanError::NoSchedulableDates`] rather than returning an
/// empty plan when no date survives filtering, and with
/// [`PlanError::RangeTooLong`] past [`MAX_TIMEFRAME_DAYS`] calendar days.
pub fn generate_plan(goal: &Goal, options: &GenerationOptions) -> Result<Vec<Task>, PlanError> {
    if goal.estimated_daily_time_minutes == 0 {
        return Err(PlanError::NoDailyTime(goal.title.clone()));
    }
    if options.include_milestones && options.milestone_frequency == 0 {
        return Err(PlanError::InvalidMilestoneFrequency);
    }

    if goal.start_date <= goal.end_date {
        let days = calendar::days_between(goal.start_date, goal.end_date) + 1;
        if days > u64::from(MAX_TIMEFRAME_DAYS) {
            return Err(PlanError::RangeTooLong {
                start: goal.start_date,
                end: goal.end_date,
                days,
            });
        }
    }

    let dates = available_dates(goal, options);
    if dates.is_empty() {
        return Err(PlanError::NoSchedulableDates {
            start: goal.start_date,
            end: goal.end_date,
        });
    }

    let daily_minutes = goal.estimated_daily_time_minutes;
    let mut tasks: Vec<Task> = Vec::with_capacity(dates.len() + dates.len() / 2);

    for (i, date) in dates.iter().enumerate() {
        tasks.push(Task {
            id: Uuid::new_v4(),
            goal_id: goal.id,
            title: format!("Day {}: {}", i + 1, goal.title),
            description: Some(daily_description(goal)),
            scheduled_date: *date,
            estimated_time_minutes: daily_minutes,
            completed: false,
            completed_at: None,
            order: i as u32,
            category: TaskCategory::Daily,
        });
    }

    if options.include_milestones {
        let frequency = options.milestone_frequency as usize;
        let review_minutes = daily_minutes.div_ceil(2);

        for (k, index) in (frequency - 1..dates.len()).step_by(frequency).enumerate() {
            tasks.push(Task {
                id: Uuid::new_v4(),
                goal_id: goal.id,
                title: format!("Milestone {}: Review Progress", k + 1),
                description: Some(format!(
                    "Look back over the last {frequency} sessions of \"{}\" and adjust the plan if needed.",
                    goal.title
                )),
                scheduled_date: dates[index],
                estimated_time_minutes: review_minutes,
                completed: false,
                completed_at: None,
                order: index as u32 + MILESTONE_ORDER_OFFSET,
                category: TaskCategory::Milestone,
            });
        }
    }

    sort_schedule(&mut tasks);

    debug!(
        goal_id = %goal.id,
        available_days = dates.len(),
        tasks = tasks.len(),
        "generated plan"
    );

    Ok(tasks)
}

fn daily_description(goal: &Goal) -> String {
    match goal.description.as_deref().map(str::trim) {
        Some(desc) if !desc.is_empty() => desc.to_string(),
        _ => format!("Work towards your goal: {}", goal.title),
    }
}

/// Replace every task belonging to `goal` with a freshly generated plan.
///
/// No diffing: completion state of the old tasks is discarded. Generation
/// runs first, so on error the caller's task list is untouched.
pub fn update_plan(
    goal: &Goal,
    existing_tasks: &[Task],
    options: &GenerationOptions,
) -> Result<Vec<Task>, PlanError> {
    let fresh = generate_plan(goal, options)?;

    let mut tasks: Vec<Task> = existing_tasks
        .iter()
        .filter(|t| t.goal_id != goal.id)
        .cloned()
        .collect();
    let kept = tasks.len();
    tasks.extend(fresh);

    debug!(
        goal_id = %goal.id,
        removed = existing_tasks.len() - kept,
        inserted = tasks.len() - kept,
        "regenerated plan"
    );

    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn break_days_drop_every_nth_plus_one() {
        // 2025-06-02 is a Monday; 9 consecutive days.
        let goal = Goal::new("Practice", d(2025, 6, 2), d(2025, 6, 10), 30);
        let opts = GenerationOptions::default().with_break_days(3);
        let dates = available_dates(&goal, &opts);
        // Positions 3 and 7 (0-based) are rest days.
        assert_eq!(dates.len(), 7);
        assert!(!dates.contains(&d(2025, 6, 5)));
        assert!(!dates.contains(&d(2025, 6, 9)));
    }

    #[test]
    fn break_frequency_zero_is_ignored() {
        let goal = Goal::new("Practice", d(2025, 6, 2), d(2025, 6, 10), 30);
        let opts = GenerationOptions::default().with_break_days(0);
        assert_eq!(available_dates(&goal, &opts).len(), 9);
    }

    #[test]
    fn weekend_removal_happens_before_break_days() {
        // Mon 2025-06-02 .. Sun 2025-06-15: 10 weekdays.
        let goal = Goal::new("Practice", d(2025, 6, 2), d(2025, 6, 15), 30);
        let opts = GenerationOptions::default()
            .with_weekends_skipped()
            .with_break_days(4);
        let dates = available_dates(&goal, &opts);
        // 10 weekdays, positions 4 and 9 dropped.
        assert_eq!(dates.len(), 8);
        assert!(!dates.contains(&d(2025, 6, 6)));
        assert!(!dates.contains(&d(2025, 6, 13)));
    }

    #[test]
    fn zero_daily_time_is_rejected() {
        let goal = Goal::new("Idle", d(2025, 6, 2), d(2025, 6, 3), 0);
        let err = generate_plan(&goal, &GenerationOptions::default()).unwrap_err();
        assert_eq!(err, PlanError::NoDailyTime("Idle".to_string()));
    }

    #[test]
    fn zero_milestone_frequency_is_rejected() {
        let goal = Goal::new("Read", d(2025, 6, 2), d(2025, 6, 3), 20);
        let opts = GenerationOptions::default().with_milestones(0);
        assert_eq!(
            generate_plan(&goal, &opts).unwrap_err(),
            PlanError::InvalidMilestoneFrequency
        );
    }

    #[test]
    fn ranges_past_the_day_limit_are_rejected() {
        let start = d(2025, 1, 1);
        let limit = u64::from(MAX_TIMEFRAME_DAYS);

        let at_limit = Goal::new("Long", start, calendar::add_days(start, limit - 1).unwrap(), 10);
        assert_eq!(
            generate_plan(&at_limit, &GenerationOptions::default()).unwrap().len(),
            MAX_TIMEFRAME_DAYS as usize
        );

        let century = Goal::new("Century", start, d(2125, 1, 1), 10);
        let err = generate_plan(&century, &GenerationOptions::default()).unwrap_err();
        assert!(matches!(err, PlanError::RangeTooLong { days: 36_525, .. }), "{err:?}");
    }

    #[test]
    fn milestone_time_rounds_up() {
        let goal = Goal::new("Read", d(2025, 6, 2), d(2025, 6, 3), 45);
        let opts = GenerationOptions::default().with_milestones(1);
        let tasks = generate_plan(&goal, &opts).unwrap();
        let milestone = tasks
            .iter()
            .find(|t| t.category == TaskCategory::Milestone)
            .unwrap();
        assert_eq!(milestone.estimated_time_minutes, 23);
    }

    #[test]
    fn goal_description_becomes_task_description() {
        let mut goal = Goal::new("Read", d(2025, 6, 2), d(2025, 6, 2), 20);
        goal.description = Some("Twenty pages a day".to_string());
        let tasks = generate_plan(&goal, &GenerationOptions::default()).unwrap();
        assert_eq!(tasks[0].description.as_deref(), Some("Twenty pages a day"));
    }

    #[test]
    fn failed_update_leaves_nothing_changed() {
        let goal = Goal::new("Read", d(2025, 6, 2), d(2025, 6, 1), 20);
        let err = update_plan(&goal, &[], &GenerationOptions::default()).unwrap_err();
        assert!(matches!(err, PlanError::NoSchedulableDates { .. }));
    }
}
