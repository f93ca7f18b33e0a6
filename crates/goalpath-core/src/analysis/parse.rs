//! Validation of plan-service responses.
//!
//! The service answers with loosely shaped JSON:
//!
//! ```json
//! { "title": "...", "duration": "21", "dailyTime": "45 minutes",
//!   "strategies": { "stepByStep": [ { "day": 1, "task": "...", "duration": 45 } ] } }
//! ```
//!
//! Nothing from that body crosses into the rest of the crate until it has
//! been turned into an [`AnalysisOutcome`].

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use super::text::{extract_days, extract_minutes, loose_quantity};
use crate::strategy::{DailyTask, ParsedGoal, StrategyError};

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// A validated analysis: the goal shape plus any service-authored plans
/// that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedGoal {
    pub goal: ParsedGoal,
    pub step_by_step: Option<Vec<DailyTask>>,
    pub progressive_load: Option<Vec<DailyTask>>,
}

impl AnalyzedGoal {
    /// An analysis without service plans; every strategy is generated locally.
    pub fn local(goal: ParsedGoal) -> Self {
        Self {
            goal,
            step_by_step: None,
            progressive_load: None,
        }
    }
}

/// Why a response body was not accepted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisRejection {
    #[error("empty response body")]
    Empty,

    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("response has no title")]
    MissingTitle,

    #[error("response has no usable duration")]
    InvalidDuration,

    #[error("response has no usable dailyTime")]
    InvalidDailyTime,

    #[error("response describes an unusable goal: {0}")]
    InvalidGoal(#[from] StrategyError),
}

/// Result of [`parse_analysis`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Parsed(AnalyzedGoal),
    Rejected(AnalysisRejection),
}

impl AnalysisOutcome {
    pub fn into_result(self) -> Result<AnalyzedGoal, AnalysisRejection> {
        match self {
            Self::Parsed(goal) => Ok(goal),
            Self::Rejected(reason) => Err(reason),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    duration: Option<Value>,
    #[serde(default)]
    daily_time: Option<Value>,
    #[serde(default)]
    strategies: Option<RawStrategies>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStrategies {
    #[serde(default)]
    step_by_step: Option<Value>,
    #[serde(default)]
    progressive_load: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawDailyTask {
    #[serde(default)]
    day: Option<Value>,
    #[serde(default)]
    task: Option<String>,
    #[serde(default)]
    duration: Option<Value>,
    #[serde(default)]
    notes: Option<String>,
}

/// A positive integer carried either as a JSON number or as text.
fn loose_number(value: &Value, extract: fn(&str) -> Option<u32>) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()).filter(|n| *n > 0),
        Value::String(s) => loose_quantity(s, extract),
        _ => None,
    }
}

fn plain_number(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Validate a response body into an [`AnalysisOutcome`].
///
/// Goal-level problems reject the whole body. A malformed strategy list only
/// drops that list; the matching strategy is then generated locally.
pub fn parse_analysis(body: &str) -> AnalysisOutcome {
    match parse_inner(body) {
        Ok(goal) => AnalysisOutcome::Parsed(goal),
        Err(reason) => AnalysisOutcome::Rejected(reason),
    }
}

fn parse_inner(body: &str) -> Result<AnalyzedGoal, AnalysisRejection> {
    if body.trim().is_empty() {
        return Err(AnalysisRejection::Empty);
    }

    let raw: RawAnalysis =
        serde_json::from_str(body).map_err(|e| AnalysisRejection::InvalidJson(e.to_string()))?;

    let title = raw
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(AnalysisRejection::MissingTitle)?;
    let timeframe_days = raw
        .duration
        .as_ref()
        .and_then(|v| loose_number(v, extract_days))
        .ok_or(AnalysisRejection::InvalidDuration)?;
    let daily_time_minutes = raw
        .daily_time
        .as_ref()
        .and_then(|v| loose_number(v, extract_minutes))
        .ok_or(AnalysisRejection::InvalidDailyTime)?;

    let goal = ParsedGoal::new(title, timeframe_days, daily_time_minutes);
    goal.validate()?;

    let strategies = raw.strategies.unwrap_or_default();
    let step_by_step = strategies
        .step_by_step
        .and_then(|v| validated_plan("stepByStep", v, timeframe_days));
    let progressive_load = strategies
        .progressive_load
        .and_then(|v| validated_plan("progressiveLoad", v, timeframe_days));

    Ok(AnalyzedGoal {
        goal,
        step_by_step,
        progressive_load,
    })
}

/// Accept a service plan only if it covers days `1..=timeframe_days` exactly
/// once, with a task text and a positive duration on every entry.
fn validated_plan(label: &str, value: Value, timeframe_days: u32) -> Option<Vec<DailyTask>> {
    match check_plan(value, timeframe_days) {
        Ok(plan) => Some(plan),
        Err(problem) => {
            warn!(strategy = label, %problem, "discarding service plan");
            None
        }
    }
}

fn check_plan(value: Value, timeframe_days: u32) -> Result<Vec<DailyTask>, String> {
    let raw: Vec<RawDailyTask> =
        serde_json::from_value(value).map_err(|e| format!("not a list of days: {e}"))?;

    let mut plan = Vec::with_capacity(raw.len());
    for (i, entry) in raw.into_iter().enumerate() {
        let day = entry
            .day
            .as_ref()
            .and_then(|v| loose_number(v, plain_number))
            .ok_or_else(|| format!("entry {i} has no day"))?;
        let task = entry
            .task
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| format!("day {day} has no task text"))?;
        let duration = entry
            .duration
            .as_ref()
            .and_then(|v| loose_number(v, extract_minutes))
            .ok_or_else(|| format!("day {day} has no positive duration"))?;
        let notes = entry.notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        plan.push(DailyTask {
            day,
            task,
            duration,
            notes,
        });
    }

    plan.sort_by_key(|t| t.day);
    let contiguous = plan.len() == timeframe_days as usize
        && plan.iter().zip(1..).all(|(t, expected)| t.day == expected);
    if !contiguous {
        return Err(format!(
            "days are not exactly 1..={timeframe_days} ({} entries)",
            plan.len()
        ));
    }
    Ok(plan)
}
