//! Terminal rendering shared by the goal, task, and plan commands.

use chrono::NaiveDate;
use uuid::Uuid;

use goalpath_core::calendar;
use goalpath_core::strategy::PlanningStrategy;
use goalpath_store::models::{Goal, Task, TaskCategory};
use goalpath_store::queries::tasks::GoalProgress;

/// First eight hex digits of an id; enough for prefix lookups.
pub fn short_id(id: Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

fn check_mark(task: &Task) -> &'static str {
    if task.completed { "x" } else { " " }
}

fn category_marker(category: TaskCategory) -> &'static str {
    match category {
        TaskCategory::Daily => "",
        TaskCategory::Milestone => " [milestone]",
        TaskCategory::Review => " [review]",
    }
}

/// One line per task: completion box, short id, date, minutes, title.
pub fn task_line(task: &Task, today: NaiveDate) -> String {
    format!(
        "  [{}] {}  {:<12} {:>4}m  {}{}",
        check_mark(task),
        short_id(task.id),
        calendar::format_relative(task.scheduled_date, today),
        task.estimated_time_minutes,
        task.title,
        category_marker(task.category),
    )
}

/// Print `tasks` under a heading, or `empty` when there are none.
pub fn print_tasks(heading: &str, tasks: &[Task], today: NaiveDate, empty: &str) {
    if tasks.is_empty() {
        println!("{empty}");
        return;
    }
    println!("{heading} ({}):", tasks.len());
    for task in tasks {
        println!("{}", task_line(task, today));
    }
}

pub fn progress_bar(progress: &GoalProgress) -> String {
    const WIDTH: usize = 20;
    let filled = (progress.percent() as usize * WIDTH) / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(WIDTH - filled),
        progress.percent()
    )
}

pub fn print_goal_header(goal: &Goal, progress: &GoalProgress) {
    println!("Goal: {} ({})", goal.title, goal.id);
    println!("Status: {}   Priority: {}", goal.status, goal.priority);
    println!(
        "Dates: {} to {}   Daily time: {} min",
        goal.start_date, goal.end_date, goal.estimated_daily_time_minutes
    );
    if let Some(desc) = &goal.description {
        println!("Description: {desc}");
    }
    if !goal.tags.is_empty() {
        println!("Tags: {}", goal.tags.join(", "));
    }
    println!(
        "Progress: {} {}/{} tasks, {}/{} min",
        progress_bar(progress),
        progress.completed,
        progress.total,
        progress.minutes_completed,
        progress.minutes_total,
    );
}

/// Print a strategy with its first `preview` plan entries.
pub fn print_strategy(strategy: &PlanningStrategy, preview: usize) {
    println!("== {} ({}) ==", strategy.name, strategy.id);
    println!("{}", strategy.description);
    println!(
        "{} entries, {} minutes total. Best for: {}",
        strategy.plan.len(),
        strategy.total_minutes(),
        strategy.best_for
    );
    for pro in &strategy.pros {
        println!("  + {pro}");
    }
    for entry in strategy.plan.iter().take(preview) {
        match &entry.notes {
            Some(notes) => println!(
                "  day {:>3}  {:>4}m  {}  ({notes})",
                entry.day, entry.duration, entry.task
            ),
            None => println!("  day {:>3}  {:>4}m  {}", entry.day, entry.duration, entry.task),
        }
    }
    if strategy.plan.len() > preview {
        println!("  ... {} more", strategy.plan.len() - preview);
    }
    println!();
}
