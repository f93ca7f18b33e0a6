//! Weekday / weekend session blocks with a phase-based focus.
//!
//! Weekend detection is positional: with 1-based day numbering, days where
//! `day % 7` is 6 or 0 are treated as the weekend regardless of the real
//! start weekday.

use super::{DailyTask, ParsedGoal, StrategyError};

/// Weekend sessions run at this share of the daily budget (tenths).
const WEEKEND_SHARE_TENTHS: u32 = 7;

/// Third of the timeframe a day falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Early,
    Mid,
    Late,
}

impl Phase {
    pub fn for_day(day: u32, timeframe_days: u32) -> Self {
        let scaled = u64::from(day) * 3;
        let total = u64::from(timeframe_days);
        if scaled <= total {
            Self::Early
        } else if scaled <= total * 2 {
            Self::Mid
        } else {
            Self::Late
        }
    }

    pub fn focus(self) -> &'static str {
        match self {
            Self::Early => "foundations",
            Self::Mid => "deliberate practice",
            Self::Late => "refinement and review",
        }
    }
}

pub fn is_weekend_day(day: u32) -> bool {
    matches!(day % 7, 0 | 6)
}

/// Weekend minutes: `floor(daily * 0.7)`, never below one minute.
pub fn weekend_minutes(daily_minutes: u32) -> u32 {
    (daily_minutes * WEEKEND_SHARE_TENTHS / 10).max(1)
}

pub fn generate(goal: &ParsedGoal) -> Result<Vec<DailyTask>, StrategyError> {
    goal.validate()?;

    let plan = (1..=goal.timeframe_days)
        .map(|day| {
            let phase = Phase::for_day(day, goal.timeframe_days);
            let weekend = is_weekend_day(day);
            let (label, duration) = if weekend {
                ("Weekend", weekend_minutes(goal.daily_time_minutes))
            } else {
                ("Weekday", goal.daily_time_minutes)
            };
            DailyTask {
                day,
                task: format!("{label} session: {} ({})", goal.title, phase.focus()),
                duration,
                notes: weekend.then(|| "Lighter block to keep momentum without burning out".to_string()),
            }
        })
        .collect();

    Ok(plan)
}
