//! `goalpath plan` subcommands: analyze, accept, regenerate.

use anyhow::{Context, Result};

use goalpath_core::analysis::{
    AnalysisSource, GoalAnalysis, HttpPlanAnalyzer, analyze_goal, analyze_offline,
    build_strategies,
};
use goalpath_core::board::GoalBoard;
use goalpath_core::calendar;
use goalpath_core::plan::{GoalDetails, accept_strategy};
use goalpath_core::strategy::PlanningStrategy;

use crate::PlanCommands;
use crate::config::GoalpathConfig;
use crate::output::{print_strategy, short_id};

/// Plan entries shown per strategy by `plan analyze`.
const PREVIEW_ENTRIES: usize = 5;

pub async fn run_plan_command(
    command: PlanCommands,
    board: &mut GoalBoard,
    config: &GoalpathConfig,
) -> Result<()> {
    match command {
        PlanCommands::Analyze {
            goal,
            offline,
            json,
        } => {
            let text = goal.join(" ");
            let analysis = analyze(&text, offline, config).await?;
            let strategies = build_strategies(&analysis.analysis)
                .context("the analyzed goal cannot be planned")?;

            if json {
                let out = serde_json::json!({
                    "goal": {
                        "title": analysis.goal().title,
                        "timeframe_days": analysis.goal().timeframe_days,
                        "daily_time_minutes": analysis.goal().daily_time_minutes,
                        "category": analysis.goal().category,
                    },
                    "source": analysis.source,
                    "strategies": strategies,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            print_analysis(&analysis);
            for strategy in &strategies {
                print_strategy(strategy, PREVIEW_ENTRIES);
            }
            println!("Accept one with: goalpath plan accept \"{text}\" --strategy <id>");
        }
        PlanCommands::Accept {
            goal,
            strategy,
            start,
            offline,
            description,
            priority,
            tags,
        } => {
            let text = goal.join(" ");
            let analysis = analyze(&text, offline, config).await?;
            let strategies = build_strategies(&analysis.analysis)
                .context("the analyzed goal cannot be planned")?;
            let chosen: &PlanningStrategy = strategies
                .iter()
                .find(|s| s.id == strategy)
                .with_context(|| format!("strategy {strategy} was not generated"))?;

            let details = GoalDetails {
                description,
                priority,
                tags,
            };
            let start = start.unwrap_or_else(calendar::today);
            let (goal, tasks) = accept_strategy(chosen, analysis.goal(), start, details)?;
            let id = board.add_goal_with_tasks(goal, tasks)?;

            print_analysis(&analysis);
            println!(
                "Created goal {} with the {} plan ({} tasks)",
                short_id(id),
                chosen.name,
                board.tasks_for_goal(id).len()
            );
        }
        PlanCommands::Regenerate { id, flags } => {
            let goal_id = board.resolve_goal(&id)?.id;
            let opts = flags.apply(config.planning);
            let count = board.regenerate_plan(goal_id, &opts)?;
            println!("Regenerated plan for goal {}: {count} tasks", short_id(goal_id));
        }
    }
    Ok(())
}

/// Analyze `text` with the configured plan service, or locally when offline
/// or no endpoint is configured.
async fn analyze(text: &str, offline: bool, config: &GoalpathConfig) -> Result<GoalAnalysis> {
    match (&config.ai_endpoint, offline) {
        (Some(endpoint), false) => {
            let analyzer = HttpPlanAnalyzer::new(endpoint.clone(), config.ai_timeout)?;
            Ok(analyze_goal(&analyzer, text).await)
        }
        _ => Ok(analyze_offline(text)),
    }
}

fn print_analysis(analysis: &GoalAnalysis) {
    let goal = analysis.goal();
    println!(
        "Goal: {} ({} days, {} min/day, {})",
        goal.title, goal.timeframe_days, goal.daily_time_minutes, goal.category
    );
    match &analysis.source {
        AnalysisSource::Service => println!("Source: plan service"),
        AnalysisSource::Local => println!("Source: local analysis"),
        AnalysisSource::Fallback { reason } => {
            println!("Source: fallback plan (plan service unavailable: {reason})");
        }
    }
    println!();
}
