//! Turning a chosen [`PlanningStrategy`] into a persisted goal and tasks.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use goalpath_store::models::{Goal, GoalStatus, Priority, Task, TaskCategory};

use super::generate::PlanError;
use crate::calendar;
use crate::strategy::{ParsedGoal, PlanningStrategy, StrategyKind};

/// User-supplied details that the strategy itself does not carry.
#[derive(Debug, Clone, Default)]
pub struct GoalDetails {
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub tags: Vec<String>,
}

/// Build a goal spanning `parsed.timeframe_days` from `start_date` and one
/// task per strategy entry, dated `start_date + day - 1`.
pub fn accept_strategy(
    strategy: &PlanningStrategy,
    parsed: &ParsedGoal,
    start_date: NaiveDate,
    details: GoalDetails,
) -> Result<(Goal, Vec<Task>), PlanError> {
    let date_for = |day: u32| {
        calendar::add_days(start_date, u64::from(day.saturating_sub(1)))
            .ok_or(PlanError::DateOutOfRange { start: start_date, day })
    };

    let end_date = date_for(parsed.timeframe_days.max(1))?;
    let now = Utc::now();

    let mut tags = details.tags;
    let category_tag = parsed.category.to_string();
    if !tags.contains(&category_tag) {
        tags.push(category_tag);
    }

    let goal = Goal {
        id: Uuid::new_v4(),
        title: parsed.title.clone(),
        description: details
            .description
            .or_else(|| Some(format!("{} plan: {}", strategy.name, strategy.description))),
        start_date,
        end_date,
        estimated_daily_time_minutes: parsed.daily_time_minutes,
        status: GoalStatus::Active,
        priority: details.priority.unwrap_or(Priority::Medium),
        tags,
        created_at: now,
        updated_at: now,
    };

    let category = match strategy.id {
        StrategyKind::Milestone => TaskCategory::Milestone,
        StrategyKind::StepByStep | StrategyKind::ProgressiveLoad | StrategyKind::TimeBlocked => {
            TaskCategory::Daily
        }
    };

    let mut tasks = Vec::with_capacity(strategy.plan.len());
    for (position, entry) in strategy.plan.iter().enumerate() {
        let description = match &entry.notes {
            Some(notes) => format!("{}\n\n{}", entry.task, notes),
            None => entry.task.clone(),
        };
        tasks.push(Task {
            id: Uuid::new_v4(),
            goal_id: goal.id,
            title: entry.task.clone(),
            description: Some(description),
            scheduled_date: date_for(entry.day)?,
            estimated_time_minutes: entry.duration,
            completed: false,
            completed_at: None,
            order: position as u32,
            category,
        });
    }

    Ok((goal, tasks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{GoalCategory, generate_strategy};

    fn parsed(days: u32) -> ParsedGoal {
        ParsedGoal {
            title: "Learn Spanish".to_string(),
            timeframe_days: days,
            daily_time_minutes: 40,
            category: GoalCategory::Learning,
        }
    }

    #[test]
    fn dates_are_offset_from_start() {
        let p = parsed(5);
        let strategy = generate_strategy(StrategyKind::StepByStep, &p).unwrap();
        let start = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
        let (goal, tasks) = accept_strategy(&strategy, &p, start, GoalDetails::default()).unwrap();

        assert_eq!(goal.end_date, NaiveDate::from_ymd_opt(2025, 2, 3).unwrap());
        assert_eq!(tasks.len(), 5);
        assert_eq!(tasks[0].scheduled_date, start);
        assert_eq!(tasks[4].scheduled_date, goal.end_date);
        assert!(tasks.iter().all(|t| t.goal_id == goal.id));
        assert!(goal.tags.contains(&"learning".to_string()));
    }

    #[test]
    fn milestone_entries_become_milestone_tasks() {
        let p = parsed(15);
        let strategy = generate_strategy(StrategyKind::Milestone, &p).unwrap();
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let (_, tasks) = accept_strategy(&strategy, &p, start, GoalDetails::default()).unwrap();

        assert_eq!(tasks.len(), 5);
        assert!(tasks.iter().all(|t| t.category == TaskCategory::Milestone));
        // First milestone closes days 1-3.
        assert_eq!(tasks[0].scheduled_date, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
    }

    #[test]
    fn explicit_details_are_kept() {
        let p = parsed(2);
        let strategy = generate_strategy(StrategyKind::TimeBlocked, &p).unwrap();
        let details = GoalDetails {
            description: Some("For the trip".to_string()),
            priority: Some(Priority::High),
            tags: vec!["travel".to_string()],
        };
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let (goal, _) = accept_strategy(&strategy, &p, start, details).unwrap();
        assert_eq!(goal.description.as_deref(), Some("For the trip"));
        assert_eq!(goal.priority, Priority::High);
        assert_eq!(goal.tags, vec!["travel".to_string(), "learning".to_string()]);
    }

    #[test]
    fn overflowing_dates_are_reported() {
        let p = parsed(10);
        let strategy = generate_strategy(StrategyKind::StepByStep, &p).unwrap();
        let err = accept_strategy(&strategy, &p, NaiveDate::MAX, GoalDetails::default()).unwrap_err();
        assert!(matches!(err, PlanError::DateOutOfRange { .. }));
    }
}
