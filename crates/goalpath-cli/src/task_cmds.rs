//! `goalpath task` subcommands: daily views and completion.

use anyhow::Result;

use goalpath_core::board::GoalBoard;
use goalpath_core::calendar;
use goalpath_store::models::Task;

use crate::TaskCommands;
use crate::output::{print_tasks, short_id};

pub fn run_task_command(command: TaskCommands, board: &mut GoalBoard) -> Result<()> {
    let today = calendar::today();
    match command {
        TaskCommands::List { goal, all } => {
            let mut tasks: Vec<Task> = match goal {
                Some(input) => {
                    let goal_id = board.resolve_goal(&input)?.id;
                    board.tasks_for_goal(goal_id)
                }
                None => {
                    let mut tasks = board.tasks().to_vec();
                    goalpath_store::queries::tasks::sort_schedule(&mut tasks);
                    tasks
                }
            };
            if !all {
                tasks.retain(|t| !t.completed);
            }
            print_tasks("Tasks", &tasks, today, "No tasks found.");
        }
        TaskCommands::Today => {
            print_tasks(
                "Today",
                &board.today_tasks(today),
                today,
                "Nothing scheduled for today.",
            );
        }
        TaskCommands::Overdue => {
            print_tasks(
                "Overdue",
                &board.overdue_tasks(today),
                today,
                "No overdue tasks.",
            );
        }
        TaskCommands::Upcoming { days } => {
            print_tasks(
                &format!("Next {days} days"),
                &board.upcoming_tasks(today, days),
                today,
                "Nothing coming up.",
            );
        }
        TaskCommands::Done { id } => {
            let task_id = board.resolve_task(&id)?.id;
            let task = board.set_task_completed(task_id, true)?;
            let goal_id = task.goal_id;
            println!("Completed {} ({})", short_id(task.id), task.title);
            if board.goal_progress(goal_id).is_finished() {
                println!("Every task for this goal is done.");
            }
        }
        TaskCommands::Undo { id } => {
            let task_id = board.resolve_task(&id)?.id;
            let task = board.set_task_completed(task_id, false)?;
            println!("Reopened {} ({})", short_id(task.id), task.title);
        }
        TaskCommands::Delete { id } => {
            let task_id = board.resolve_task(&id)?.id;
            board.delete_task(task_id)?;
            println!("Deleted task {}", short_id(task_id));
        }
    }
    Ok(())
}
