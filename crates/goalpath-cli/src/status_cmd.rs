//! `goalpath status` command: dashboard summary and today's work.

use chrono::NaiveDate;

use goalpath_core::board::GoalBoard;
use goalpath_core::calendar;
use goalpath_store::models::GoalStatus;

use crate::output::{print_tasks, progress_bar, short_id};

/// Run the status command against the local clock.
pub fn run_status(board: &GoalBoard) {
    print_status(board, calendar::today());
}

fn print_status(board: &GoalBoard, today: NaiveDate) {
    let summary = board.dashboard_summary(today);

    println!("Today: {}", today.format("%A, %B %-d %Y"));
    println!(
        "Goals: {} total, {} active, {} paused, {} completed",
        summary.total_goals, summary.active_goals, summary.paused_goals, summary.completed_goals
    );
    println!(
        "Today: {}/{} tasks done, {} min remaining",
        summary.today_completed, summary.today_total, summary.today_minutes_remaining
    );
    println!("Overall completion: {}%", summary.completion_percent);
    println!("Streak: {} day(s)", summary.streak_days);
    if summary.overdue > 0 {
        println!("Overdue: {} task(s), see `goalpath task overdue`", summary.overdue);
    }
    println!();

    let active: Vec<_> = board
        .goals()
        .iter()
        .filter(|g| g.status == GoalStatus::Active)
        .collect();
    if !active.is_empty() {
        println!("Active goals:");
        for goal in active {
            println!(
                "  {:<10} {:<38} {}",
                short_id(goal.id),
                goal.title,
                progress_bar(&board.goal_progress(goal.id))
            );
        }
        println!();
    }

    print_tasks(
        "Today's tasks",
        &board.today_tasks(today),
        today,
        "Nothing scheduled for today.",
    );
}
