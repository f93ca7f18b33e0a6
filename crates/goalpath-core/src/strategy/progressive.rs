//! Linearly ramping effort, from half the daily budget up to all of it.

use super::{DailyTask, ParsedGoal, StrategyError};

/// Number of days at each end that carry a ramp note.
const RAMP_NOTE_DAYS: u32 = 3;

/// Minutes for `day` of `timeframe_days`:
/// `floor(max * 0.5 + max * 0.5 * day / timeframe_days)`, at least one.
///
/// Computed as `max * (timeframe_days + day) / (2 * timeframe_days)` in
/// integers, which is the same value without float rounding.
pub fn duration_for_day(day: u32, timeframe_days: u32, max_minutes: u32) -> u32 {
    let n = u64::from(timeframe_days.max(1));
    let minutes = u64::from(max_minutes) * (n + u64::from(day)) / (2 * n);
    u32::try_from(minutes).unwrap_or(max_minutes).max(1)
}

fn note_for_day(day: u32, timeframe_days: u32) -> Option<String> {
    if day <= RAMP_NOTE_DAYS {
        Some("Building the habit: keep it light and consistent".to_string())
    } else if day > timeframe_days.saturating_sub(RAMP_NOTE_DAYS) {
        Some("Final sprint: full intensity to the finish".to_string())
    } else {
        None
    }
}

pub fn generate(goal: &ParsedGoal) -> Result<Vec<DailyTask>, StrategyError> {
    goal.validate()?;

    let n = goal.timeframe_days;
    let plan = (1..=n)
        .map(|day| {
            let duration = duration_for_day(day, n, goal.daily_time_minutes);
            let intensity = duration * 100 / goal.daily_time_minutes;
            DailyTask {
                day,
                task: format!("Day {day}: {} at {intensity}% intensity", goal.title),
                duration,
                notes: note_for_day(day, n),
            }
        })
        .collect();

    Ok(plan)
}
