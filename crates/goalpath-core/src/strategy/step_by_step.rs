//! Constant daily effort with a weekly consolidation note.

use super::{DailyTask, ParsedGoal, StrategyError};

/// Every `REVIEW_INTERVAL`-th day carries a consolidation note.
pub const REVIEW_INTERVAL: u32 = 7;

pub fn generate(goal: &ParsedGoal) -> Result<Vec<DailyTask>, StrategyError> {
    goal.validate()?;

    let plan = (1..=goal.timeframe_days)
        .map(|day| DailyTask {
            day,
            task: format!("Day {day}: Work on {}", goal.title),
            duration: goal.daily_time_minutes,
            notes: (day % REVIEW_INTERVAL == 0)
                .then(|| "Review and consolidate what you covered this week".to_string()),
        })
        .collect();

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_duration_and_weekly_notes() {
        let goal = ParsedGoal::new("Learn chess", 15, 25);
        let plan = generate(&goal).unwrap();

        assert_eq!(plan.len(), 15);
        assert!(plan.iter().all(|t| t.duration == 25));
        assert_eq!(plan[0].task, "Day 1: Work on Learn chess");

        let noted: Vec<u32> = plan
            .iter()
            .filter(|t| t.notes.is_some())
            .map(|t| t.day)
            .collect();
        assert_eq!(noted, vec![7, 14]);
    }
}
