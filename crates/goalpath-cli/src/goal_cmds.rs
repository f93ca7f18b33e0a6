//! `goalpath goal` subcommands: add, list, show, edit, status, delete.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use goalpath_core::board::{GoalBoard, GoalUpdate};
use goalpath_core::calendar;
use goalpath_store::models::Goal;

use crate::GoalCommands;
use crate::config::GoalpathConfig;
use crate::output::{print_goal_header, print_tasks, progress_bar, short_id};

pub fn run_goal_command(
    command: GoalCommands,
    board: &mut GoalBoard,
    config: &GoalpathConfig,
) -> Result<()> {
    let today = calendar::today();
    match command {
        GoalCommands::Add {
            title,
            start,
            end,
            days,
            minutes,
            description,
            priority,
            tags,
            no_plan,
            flags,
        } => {
            let start = start.unwrap_or(today);
            let end = match end {
                Some(end) => end,
                None => end_from_days(start, days)?,
            };

            let mut goal = Goal::new(title, start, end, minutes);
            goal.description = description;
            goal.tags = tags;
            if let Some(p) = priority {
                goal.priority = p;
            }

            let opts = flags.apply(config.planning);
            let id = board.create_goal(goal, (!no_plan).then_some(&opts))?;
            let count = board.tasks_for_goal(id).len();
            println!("Created goal {} ({count} tasks)", short_id(id));
        }
        GoalCommands::List { status } => {
            let goals: Vec<&Goal> = board
                .goals()
                .iter()
                .filter(|g| status.is_none_or(|s| g.status == s))
                .collect();
            if goals.is_empty() {
                println!("No goals found.");
                return Ok(());
            }
            println!(
                "{:<10} {:<30} {:<10} {:<8} {:<24} END",
                "ID", "TITLE", "STATUS", "PRIORITY", "PROGRESS"
            );
            for goal in goals {
                let progress = board.goal_progress(goal.id);
                println!(
                    "{:<10} {:<30} {:<10} {:<8} {:<24} {}",
                    short_id(goal.id),
                    truncate(&goal.title, 30),
                    goal.status,
                    goal.priority,
                    progress_bar(&progress),
                    goal.end_date,
                );
            }
        }
        GoalCommands::Show { id } => {
            let goal = board.resolve_goal(&id)?;
            let progress = board.goal_progress(goal.id);
            print_goal_header(goal, &progress);
            println!();
            print_tasks("Tasks", &board.tasks_for_goal(goal.id), today, "No tasks scheduled.");
        }
        GoalCommands::Edit {
            id,
            title,
            description,
            start,
            end,
            minutes,
            priority,
            tags,
            regenerate,
            flags,
        } => {
            let goal_id = board.resolve_goal(&id)?.id;
            let update = GoalUpdate {
                title,
                description: description.map(|d| (!d.trim().is_empty()).then_some(d)),
                start_date: start,
                end_date: end,
                estimated_daily_time_minutes: minutes,
                priority,
                tags,
                ..GoalUpdate::default()
            };
            let opts = flags.apply(config.planning);
            let goal = board.update_goal(goal_id, update, regenerate.then_some(&opts))?;
            println!("Updated goal {} ({})", short_id(goal.id), goal.title);
            if regenerate {
                let count = board.tasks_for_goal(goal_id).len();
                println!("Plan regenerated: {count} tasks");
            }
        }
        GoalCommands::Status { id, status } => {
            let goal_id = board.resolve_goal(&id)?.id;
            board.set_goal_status(goal_id, status)?;
            println!("Goal {} is now {status}", short_id(goal_id));
        }
        GoalCommands::Delete { id } => {
            let goal_id = board.resolve_goal(&id)?.id;
            let removed = board.delete_goal(goal_id)?;
            println!("Deleted goal {} and {removed} tasks", short_id(goal_id));
        }
    }
    Ok(())
}

/// Last day of a goal that runs `days` days from `start`, inclusive.
fn end_from_days(start: NaiveDate, days: u32) -> Result<NaiveDate> {
    if days == 0 {
        anyhow::bail!("--days must be at least 1");
    }
    calendar::add_days(start, u64::from(days - 1))
        .with_context(|| format!("{days} days from {start} is past the end of the calendar"))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
