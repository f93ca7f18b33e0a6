use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Lifecycle status of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Active,
    Completed,
    Paused,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
        };
        f.write_str(s)
    }
}

impl FromStr for GoalStatus {
    type Err = GoalStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "paused" => Ok(Self::Paused),
            other => Err(GoalStatusParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`GoalStatus`] string.
#[derive(Debug, Clone)]
pub struct GoalStatusParseError(pub String);

impl fmt::Display for GoalStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid goal status: {:?}", self.0)
    }
}

impl std::error::Error for GoalStatusParseError {}

// ---------------------------------------------------------------------------

/// How much a goal matters relative to the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(s)
    }
}

impl FromStr for Priority {
    type Err = PriorityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(PriorityParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Priority`] string.
#[derive(Debug, Clone)]
pub struct PriorityParseError(pub String);

impl fmt::Display for PriorityParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid priority: {:?}", self.0)
    }
}

impl std::error::Error for PriorityParseError {}

// ---------------------------------------------------------------------------

/// Kind of scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Daily,
    Milestone,
    Review,
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Daily => "daily",
            Self::Milestone => "milestone",
            Self::Review => "review",
        };
        f.write_str(s)
    }
}

impl FromStr for TaskCategory {
    type Err = TaskCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "milestone" => Ok(Self::Milestone),
            "review" => Ok(Self::Review),
            other => Err(TaskCategoryParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`TaskCategory`] string.
#[derive(Debug, Clone)]
pub struct TaskCategoryParseError(pub String);

impl fmt::Display for TaskCategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid task category: {:?}", self.0)
    }
}

impl std::error::Error for TaskCategoryParseError {}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A goal the user is working towards over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub estimated_daily_time_minutes: u32,
    pub status: GoalStatus,
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Build a new active, medium-priority goal with a fresh id.
    pub fn new(
        title: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        estimated_daily_time_minutes: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            start_date,
            end_date,
            estimated_daily_time_minutes,
            status: GoalStatus::Active,
            priority: Priority::Medium,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A unit of work scheduled on a single calendar date.
///
/// `order` disambiguates tasks that share a `scheduled_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub goal_id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub scheduled_date: NaiveDate,
    pub estimated_time_minutes: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub order: u32,
    pub category: TaskCategory,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_status_display_roundtrip() {
        let variants = [GoalStatus::Active, GoalStatus::Completed, GoalStatus::Paused];
        for v in &variants {
            let s = v.to_string();
            let parsed: GoalStatus = s.parse().expect("should parse");
            assert_eq!(*v, parsed);
        }
    }

    #[test]
    fn goal_status_invalid() {
        let result = "archived".parse::<GoalStatus>();
        assert!(result.is_err());
    }

    #[test]
    fn priority_orders_low_to_high() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn task_category_invalid() {
        let err = "weekly".parse::<TaskCategory>().unwrap_err();
        assert_eq!(err.to_string(), "invalid task category: \"weekly\"");
    }

    #[test]
    fn task_serializes_dates_as_iso_strings() {
        let task = Task {
            id: Uuid::nil(),
            goal_id: Uuid::nil(),
            title: "Day 1: Learn Rust".to_string(),
            description: None,
            scheduled_date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            estimated_time_minutes: 45,
            completed: false,
            completed_at: None,
            order: 0,
            category: TaskCategory::Daily,
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["scheduled_date"], "2025-03-04");
        assert_eq!(json["category"], "daily");
        assert!(json.get("completed_at").is_none());

        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn goal_new_defaults() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let goal = Goal::new("Read a book", start, end, 30);
        assert_eq!(goal.status, GoalStatus::Active);
        assert_eq!(goal.priority, Priority::Medium);
        assert!(goal.tags.is_empty());
        assert_eq!(goal.created_at, goal.updated_at);
    }
}
