//! The fixed plan used when the plan service cannot be used.

use super::parse::AnalyzedGoal;
use super::text::title_from;
use crate::strategy::{DailyTask, GoalCategory, ParsedGoal};

pub const FALLBACK_TIMEFRAME_DAYS: u32 = 2;
pub const FALLBACK_DAILY_MINUTES: u32 = 60;

const UNTITLED: &str = "My goal";

/// Two-day starter plan built from the goal text alone.
///
/// Deterministic: the same text always yields the same analysis.
pub fn fallback_analysis(goal_text: &str) -> AnalyzedGoal {
    let title = match title_from(goal_text) {
        t if t.is_empty() => UNTITLED.to_string(),
        t => t,
    };

    let step_by_step = vec![
        DailyTask {
            day: 1,
            task: format!("Research and plan: {title}"),
            duration: FALLBACK_DAILY_MINUTES,
            notes: Some("Gather resources and decide what done looks like.".to_string()),
        },
        DailyTask {
            day: 2,
            task: format!("Take the first concrete step: {title}"),
            duration: FALLBACK_DAILY_MINUTES,
            notes: None,
        },
    ];
    let progressive_load = vec![
        DailyTask {
            day: 1,
            task: format!("Research and plan: {title}"),
            duration: FALLBACK_DAILY_MINUTES / 2,
            notes: Some("Start small.".to_string()),
        },
        DailyTask {
            day: 2,
            task: format!("Take the first concrete step: {title}"),
            duration: FALLBACK_DAILY_MINUTES,
            notes: None,
        },
    ];

    AnalyzedGoal {
        goal: ParsedGoal {
            category: GoalCategory::infer(&title),
            title,
            timeframe_days: FALLBACK_TIMEFRAME_DAYS,
            daily_time_minutes: FALLBACK_DAILY_MINUTES,
        },
        step_by_step: Some(step_by_step),
        progressive_load: Some(progressive_load),
    }
}
