//! Knobs that shape a generated schedule.

use serde::{Deserialize, Serialize};

/// Options for [`super::generate_plan`].
///
/// Also read from the `[planning]` table of the config file, so every field
/// has a serde default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Insert rest days into the schedule.
    pub include_break_days: bool,
    /// Number of consecutive working days before each rest day.
    pub break_day_frequency: u32,
    /// Add a review task every `milestone_frequency` scheduled days.
    pub include_milestones: bool,
    pub milestone_frequency: u32,
    /// Skip Saturdays and Sundays.
    pub auto_adjust_for_weekends: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            include_break_days: false,
            break_day_frequency: 6,
            include_milestones: false,
            milestone_frequency: 7,
            auto_adjust_for_weekends: false,
        }
    }
}

impl GenerationOptions {
    pub fn with_weekends_skipped(mut self) -> Self {
        self.auto_adjust_for_weekends = true;
        self
    }

    pub fn with_break_days(mut self, frequency: u32) -> Self {
        self.include_break_days = true;
        self.break_day_frequency = frequency;
        self
    }

    pub fn with_milestones(mut self, frequency: u32) -> Self {
        self.include_milestones = true;
        self.milestone_frequency = frequency;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_table_fills_defaults() {
        let opts: GenerationOptions = toml::from_str("include_milestones = true").unwrap();
        assert!(opts.include_milestones);
        assert_eq!(opts.milestone_frequency, 7);
        assert!(!opts.auto_adjust_for_weekends);
    }

    #[test]
    fn builders_enable_features() {
        let opts = GenerationOptions::default()
            .with_weekends_skipped()
            .with_break_days(4)
            .with_milestones(5);
        assert!(opts.auto_adjust_for_weekends);
        assert!(opts.include_break_days);
        assert_eq!(opts.break_day_frequency, 4);
        assert_eq!(opts.milestone_frequency, 5);
    }
}
