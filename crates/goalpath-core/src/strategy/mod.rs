//! Scheduling strategies over relative days.
//!
//! Every strategy consumes the same [`ParsedGoal`] and produces a list of
//! [`DailyTask`]s keyed by 1-based day number. Calendar dates are assigned
//! only when a strategy is accepted (see [`crate::plan::accept_strategy`]).
//!
//! Output cardinality differs: step-by-step, progressive-load and
//! time-blocked emit one entry per day; milestone emits one per chunk.

pub mod milestone;
pub mod progressive;
pub mod step_by_step;
pub mod time_blocked;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Broad domain of a goal, used to pick canned phase descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    Learning,
    Fitness,
    Creative,
    Professional,
    Personal,
    General,
}

impl GoalCategory {
    /// Guess a category from keywords in free text. Falls back to `General`.
    pub fn infer(text: &str) -> Self {
        const TABLE: &[(GoalCategory, &[&str])] = &[
            (
                GoalCategory::Fitness,
                &["run", "marathon", "workout", "gym", "fitness", "weight", "yoga", "swim", "cycling", "exercise"],
            ),
            (
                GoalCategory::Learning,
                &["learn", "study", "language", "spanish", "french", "course", "exam", "read", "code", "programming"],
            ),
            (
                GoalCategory::Creative,
                &["write", "novel", "book", "paint", "draw", "guitar", "piano", "music", "song", "photograph"],
            ),
            (
                GoalCategory::Professional,
                &["career", "job", "interview", "business", "portfolio", "certification", "promotion", "startup"],
            ),
            (
                GoalCategory::Personal,
                &["habit", "meditat", "sleep", "journal", "declutter", "save money", "budget", "family"],
            ),
        ];

        let lower = text.to_lowercase();
        TABLE
            .iter()
            .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
            .map(|(category, _)| *category)
            .unwrap_or(GoalCategory::General)
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Learning => "learning",
            Self::Fitness => "fitness",
            Self::Creative => "creative",
            Self::Professional => "professional",
            Self::Personal => "personal",
            Self::General => "general",
        };
        f.write_str(s)
    }
}

/// Longest plan the generators will produce (ten years).
pub const MAX_TIMEFRAME_DAYS: u32 = 3650;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Goal shape consumed by the strategy generators. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedGoal {
    pub title: String,
    pub timeframe_days: u32,
    pub daily_time_minutes: u32,
    pub category: GoalCategory,
}

impl ParsedGoal {
    pub fn new(title: impl Into<String>, timeframe_days: u32, daily_time_minutes: u32) -> Self {
        let title = title.into();
        let category = GoalCategory::infer(&title);
        Self {
            title,
            timeframe_days,
            daily_time_minutes,
            category,
        }
    }

    /// Reject inputs the generators cannot turn into a non-empty plan.
    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.timeframe_days == 0 {
            return Err(StrategyError::InvalidTimeframe);
        }
        if self.timeframe_days > MAX_TIMEFRAME_DAYS {
            return Err(StrategyError::TimeframeTooLong(self.timeframe_days));
        }
        if self.daily_time_minutes == 0 {
            return Err(StrategyError::InvalidDailyTime);
        }
        if self.daily_time_minutes > MINUTES_PER_DAY {
            return Err(StrategyError::DailyTimeTooLong(self.daily_time_minutes));
        }
        if self.title.trim().is_empty() {
            return Err(StrategyError::EmptyTitle);
        }
        Ok(())
    }
}

/// One entry of a strategy plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTask {
    /// 1-based relative day.
    pub day: u32,
    pub task: String,
    /// Minutes.
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Identifier of a strategy variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    StepByStep,
    ProgressiveLoad,
    Milestone,
    TimeBlocked,
}

impl StrategyKind {
    /// All variants in presentation order.
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::StepByStep,
        StrategyKind::ProgressiveLoad,
        StrategyKind::Milestone,
        StrategyKind::TimeBlocked,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::StepByStep => "Step-by-Step",
            Self::ProgressiveLoad => "Progressive Load",
            Self::Milestone => "Milestone-Based",
            Self::TimeBlocked => "Time-Blocked",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::StepByStep => "The same amount of focused work every day, one step at a time.",
            Self::ProgressiveLoad => "Start at half intensity and build up to your full daily budget.",
            Self::Milestone => "Work in phases, each ending in a concrete milestone.",
            Self::TimeBlocked => "Full weekday sessions with lighter weekend blocks.",
        }
    }

    pub fn pros(self) -> &'static [&'static str] {
        match self {
            Self::StepByStep => &[
                "Predictable daily routine",
                "Easy to track",
                "Weekly review points",
            ],
            Self::ProgressiveLoad => &[
                "Gentle start builds the habit",
                "Reduces early burnout",
                "Peaks when you are most practiced",
            ],
            Self::Milestone => &[
                "Clear checkpoints",
                "Flexible day-to-day work",
                "Sense of progress at each phase",
            ],
            Self::TimeBlocked => &[
                "Respects weekend downtime",
                "Structured focus phases",
                "Sustainable over long timeframes",
            ],
        }
    }

    pub fn best_for(self) -> &'static str {
        match self {
            Self::StepByStep => "People who thrive on routine and consistency",
            Self::ProgressiveLoad => "Beginners or anyone returning after a break",
            Self::Milestone => "Goals with natural phases or deliverables",
            Self::TimeBlocked => "Busy schedules that differ between weekdays and weekends",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::StepByStep => "step-by-step",
            Self::ProgressiveLoad => "progressive-load",
            Self::Milestone => "milestone",
            Self::TimeBlocked => "time-blocked",
        };
        f.write_str(s)
    }
}

impl FromStr for StrategyKind {
    type Err = StrategyKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "step-by-step" | "step_by_step" | "stepByStep" => Ok(Self::StepByStep),
            "progressive-load" | "progressive_load" | "progressiveLoad" => {
                Ok(Self::ProgressiveLoad)
            }
            "milestone" => Ok(Self::Milestone),
            "time-blocked" | "time_blocked" | "timeBlocked" => Ok(Self::TimeBlocked),
            other => Err(StrategyKindParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`StrategyKind`] string.
#[derive(Debug, Clone)]
pub struct StrategyKindParseError(pub String);

impl fmt::Display for StrategyKindParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid strategy: {:?} (expected step-by-step, progressive-load, milestone, or time-blocked)",
            self.0
        )
    }
}

impl std::error::Error for StrategyKindParseError {}

/// A fully described strategy, ready to present or accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningStrategy {
    pub id: StrategyKind,
    pub name: String,
    pub description: String,
    pub plan: Vec<DailyTask>,
    pub pros: Vec<String>,
    pub best_for: String,
}

impl PlanningStrategy {
    /// Wrap a plan with the metadata of `kind`.
    pub fn from_plan(kind: StrategyKind, plan: Vec<DailyTask>) -> Self {
        Self {
            id: kind,
            name: kind.name().to_string(),
            description: kind.description().to_string(),
            plan,
            pros: kind.pros().iter().map(|p| p.to_string()).collect(),
            best_for: kind.best_for().to_string(),
        }
    }

    pub fn total_minutes(&self) -> u32 {
        self.plan
            .iter()
            .fold(0u32, |acc, t| acc.saturating_add(t.duration))
    }
}

/// Errors from strategy generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StrategyError {
    #[error("timeframe must be at least one day")]
    InvalidTimeframe,

    #[error("timeframe of {0} days exceeds the {MAX_TIMEFRAME_DAYS}-day limit")]
    TimeframeTooLong(u32),

    #[error("daily time must be at least one minute")]
    InvalidDailyTime,

    #[error("daily time of {0} minutes does not fit in a day")]
    DailyTimeTooLong(u32),

    #[error("goal title must not be empty")]
    EmptyTitle,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run the generator for `kind` and wrap the result.
pub fn generate_strategy(
    kind: StrategyKind,
    goal: &ParsedGoal,
) -> Result<PlanningStrategy, StrategyError> {
    let plan = match kind {
        StrategyKind::StepByStep => step_by_step::generate(goal)?,
        StrategyKind::ProgressiveLoad => progressive::generate(goal)?,
        StrategyKind::Milestone => milestone::generate(goal)?,
        StrategyKind::TimeBlocked => time_blocked::generate(goal)?,
    };
    Ok(PlanningStrategy::from_plan(kind, plan))
}

/// Every strategy for `goal`, in [`StrategyKind::ALL`] order.
pub fn generate_all(goal: &ParsedGoal) -> Result<Vec<PlanningStrategy>, StrategyError> {
    StrategyKind::ALL
        .iter()
        .map(|kind| generate_strategy(*kind, goal))
        .collect()
}
