//! Integration tests for calendar plan generation and regeneration.
//!
//! Covers the scheduling properties: one task per available date, weekend
//! filtering, milestone placement, idempotent regeneration, and the
//! unschedulable-range failure.

use std::collections::HashSet;

use chrono::{Datelike, Weekday};

use goalpath_core::calendar;
use goalpath_core::plan::{
    GenerationOptions, MILESTONE_ORDER_OFFSET, PlanError, generate_plan, update_plan,
};
use goalpath_store::models::{Task, TaskCategory};
use goalpath_test_utils::{date, goal_for_days, monday};

fn daily(tasks: &[Task]) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.category == TaskCategory::Daily)
        .collect()
}

fn milestones(tasks: &[Task]) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.category == TaskCategory::Milestone)
        .collect()
}

// ---------------------------------------------------------------------------
// Unfiltered generation
// ---------------------------------------------------------------------------

#[test]
fn one_task_per_calendar_date_in_order() {
    for days in [1u64, 2, 7, 31, 90] {
        let goal = goal_for_days("Read", date(2025, 2, 20), days, 25);
        let tasks = generate_plan(&goal, &GenerationOptions::default()).unwrap();

        let expected = calendar::days_between(goal.start_date, goal.end_date) + 1;
        assert_eq!(tasks.len() as u64, expected);
        assert_eq!(tasks.len() as u64, days);

        let dates: Vec<_> = tasks.iter().map(|t| t.scheduled_date).collect();
        assert_eq!(dates, calendar::date_range(goal.start_date, goal.end_date));
    }
}

#[test]
fn ten_day_scenario() {
    let goal = goal_for_days("Learn Rust", date(2025, 1, 1), 10, 60);
    let tasks = generate_plan(&goal, &GenerationOptions::default()).unwrap();

    assert_eq!(tasks.len(), 10);
    for (i, task) in tasks.iter().enumerate() {
        assert_eq!(task.estimated_time_minutes, 60);
        assert_eq!(task.order, i as u32);
        assert_eq!(task.category, TaskCategory::Daily);
        assert_eq!(task.title, format!("Day {}: Learn Rust", i + 1));
        assert_eq!(task.goal_id, goal.id);
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
    }
}

#[test]
fn task_ids_are_unique() {
    let goal = goal_for_days("Read", monday(), 30, 20);
    let tasks = generate_plan(&goal, &GenerationOptions::default().with_milestones(7)).unwrap();
    let ids: HashSet<_> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(ids.len(), tasks.len());
}

#[test]
fn reversed_range_is_unschedulable() {
    let mut goal = goal_for_days("Read", date(2025, 3, 10), 1, 30);
    goal.end_date = date(2025, 3, 9);

    let err = generate_plan(&goal, &GenerationOptions::default()).unwrap_err();
    assert_eq!(
        err,
        PlanError::NoSchedulableDates {
            start: date(2025, 3, 10),
            end: date(2025, 3, 9),
        }
    );
    assert!(err.to_string().starts_with("cannot schedule: no valid days in range"));
}

// ---------------------------------------------------------------------------
// Weekends
// ---------------------------------------------------------------------------

#[test]
fn weekend_adjustment_removes_exactly_weekend_tasks() {
    let goal = goal_for_days("Swim", date(2025, 6, 4), 45, 30);
    let all = generate_plan(&goal, &GenerationOptions::default()).unwrap();
    let weekdays = generate_plan(&goal, &GenerationOptions::default().with_weekends_skipped()).unwrap();

    let kept: Vec<_> = all
        .iter()
        .filter(|t| !matches!(t.scheduled_date.weekday(), Weekday::Sat | Weekday::Sun))
        .map(|t| t.scheduled_date)
        .collect();
    let got: Vec<_> = weekdays.iter().map(|t| t.scheduled_date).collect();

    assert_eq!(got, kept);
    assert!(weekdays.iter().all(|t| !calendar::is_weekend(t.scheduled_date)));
}

#[test]
fn weekend_only_range_is_unschedulable() {
    // Saturday and Sunday.
    let goal = goal_for_days("Hike", date(2025, 6, 7), 2, 90);
    let err = generate_plan(&goal, &GenerationOptions::default().with_weekends_skipped()).unwrap_err();
    assert!(matches!(err, PlanError::NoSchedulableDates { .. }));
}

// ---------------------------------------------------------------------------
// Milestones
// ---------------------------------------------------------------------------

#[test]
fn milestone_scenario_every_five_days() {
    let goal = goal_for_days("Learn Rust", date(2025, 1, 1), 10, 60);
    let tasks = generate_plan(&goal, &GenerationOptions::default().with_milestones(5)).unwrap();

    assert_eq!(daily(&tasks).len(), 10);
    let ms = milestones(&tasks);
    assert_eq!(ms.len(), 2);
    assert_eq!(ms[0].scheduled_date, date(2025, 1, 5));
    assert_eq!(ms[1].scheduled_date, date(2025, 1, 10));
    assert!(ms.iter().all(|t| t.estimated_time_minutes == 30));
    assert_eq!(ms[0].title, "Milestone 1: Review Progress");
    assert_eq!(ms[1].order, 9 + MILESTONE_ORDER_OFFSET);
}

#[test]
fn milestone_count_is_floor_of_available_over_frequency() {
    let goal = goal_for_days("Draw", monday(), 30, 40);
    for f in 1..=12u32 {
        let opts = GenerationOptions::default()
            .with_weekends_skipped()
            .with_milestones(f);
        let tasks = generate_plan(&goal, &opts).unwrap();
        let available = daily(&tasks);
        let ms = milestones(&tasks);

        assert_eq!(ms.len(), available.len() / f as usize, "frequency {f}");
        for (k, m) in ms.iter().enumerate() {
            let nth = (k + 1) * f as usize - 1;
            assert_eq!(m.scheduled_date, available[nth].scheduled_date);
        }
    }
}

#[test]
fn milestones_sort_after_same_day_work() {
    let goal = goal_for_days("Draw", monday(), 6, 40);
    let tasks = generate_plan(&goal, &GenerationOptions::default().with_milestones(3)).unwrap();
    let third_day: Vec<_> = tasks
        .iter()
        .filter(|t| t.scheduled_date == date(2025, 6, 4))
        .collect();
    assert_eq!(third_day.len(), 2);
    assert_eq!(third_day[0].category, TaskCategory::Daily);
    assert_eq!(third_day[1].category, TaskCategory::Milestone);
}

// ---------------------------------------------------------------------------
// Break days
// ---------------------------------------------------------------------------

#[test]
fn break_days_thin_the_schedule() {
    let goal = goal_for_days("Lift", monday(), 14, 45);
    let tasks = generate_plan(&goal, &GenerationOptions::default().with_break_days(6)).unwrap();
    // Every 7th date is a rest day.
    assert_eq!(tasks.len(), 12);
    assert!(!tasks.iter().any(|t| t.scheduled_date == date(2025, 6, 8)));
    assert!(!tasks.iter().any(|t| t.scheduled_date == date(2025, 6, 15)));
}

// ---------------------------------------------------------------------------
// Regeneration
// ---------------------------------------------------------------------------

fn shape(tasks: &[Task]) -> Vec<(chrono::NaiveDate, u32, String, u32, TaskCategory)> {
    let mut out: Vec<_> = tasks
        .iter()
        .map(|t| {
            (
                t.scheduled_date,
                t.order,
                t.title.clone(),
                t.estimated_time_minutes,
                t.category,
            )
        })
        .collect();
    out.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
    out
}

#[test]
fn update_plan_is_idempotent_in_shape_not_identity() {
    let goal = goal_for_days("Write", monday(), 20, 30);
    let other = goal_for_days("Run", monday(), 5, 20);
    let opts = GenerationOptions::default().with_milestones(4);

    let mut existing = generate_plan(&goal, &opts).unwrap();
    existing.extend(generate_plan(&other, &GenerationOptions::default()).unwrap());
    let old_ids: HashSet<_> = existing
        .iter()
        .filter(|t| t.goal_id == goal.id)
        .map(|t| t.id)
        .collect();

    let first = update_plan(&goal, &existing, &opts).unwrap();
    let second = update_plan(&goal, &first, &opts).unwrap();

    let mine = |tasks: &[Task]| -> Vec<Task> {
        tasks.iter().filter(|t| t.goal_id == goal.id).cloned().collect()
    };
    assert_eq!(shape(&mine(&first)), shape(&mine(&second)));
    assert_eq!(mine(&first).len(), mine(&existing).len());

    // No task from the previous plan survives.
    assert!(first.iter().all(|t| !old_ids.contains(&t.id)));
    let first_ids: HashSet<_> = mine(&first).iter().map(|t| t.id).collect();
    assert!(second.iter().all(|t| !first_ids.contains(&t.id)));

    // Other goals are untouched.
    assert_eq!(second.iter().filter(|t| t.goal_id == other.id).count(), 5);
}

#[test]
fn update_plan_discards_completion_state() {
    let goal = goal_for_days("Write", monday(), 3, 30);
    let opts = GenerationOptions::default();
    let mut existing = generate_plan(&goal, &opts).unwrap();
    existing[0].completed = true;

    let fresh = update_plan(&goal, &existing, &opts).unwrap();
    assert!(fresh.iter().all(|t| !t.completed));
}
