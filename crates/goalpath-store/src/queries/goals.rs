//! Query helpers over the goal collection.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Goal, GoalStatus};

/// Failure to resolve a user-supplied id or id prefix.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("no {kind} matches {input:?}")]
    NotFound { kind: &'static str, input: String },

    #[error("{input:?} is ambiguous: matches {count} {kind}s")]
    Ambiguous {
        kind: &'static str,
        input: String,
        count: usize,
    },
}

/// Resolve `input` (a full UUID or a unique, case-insensitive prefix of one)
/// against `ids`.
pub fn resolve_id<I>(ids: I, input: &str, kind: &'static str) -> Result<Uuid, LookupError>
where
    I: IntoIterator<Item = Uuid>,
{
    let needle = input.trim().to_ascii_lowercase();
    let not_found = || LookupError::NotFound {
        kind,
        input: input.to_string(),
    };
    if needle.is_empty() {
        return Err(not_found());
    }

    let matches: Vec<Uuid> = ids
        .into_iter()
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [] => Err(not_found()),
        [one] => Ok(*one),
        many => Err(LookupError::Ambiguous {
            kind,
            input: input.to_string(),
            count: many.len(),
        }),
    }
}

pub fn find_goal(goals: &[Goal], id: Uuid) -> Option<&Goal> {
    goals.iter().find(|g| g.id == id)
}

/// Resolve a goal id or prefix against the collection.
pub fn resolve_goal_id(goals: &[Goal], input: &str) -> Result<Uuid, LookupError> {
    resolve_id(goals.iter().map(|g| g.id), input, "goal")
}

/// Goals with the given status, highest priority first, then by start date.
pub fn goals_with_status(goals: &[Goal], status: GoalStatus) -> Vec<&Goal> {
    let mut out: Vec<&Goal> = goals.iter().filter(|g| g.status == status).collect();
    out.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(a.start_date.cmp(&b.start_date))
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Uuid {
        Uuid::parse_str(s).unwrap()
    }

    #[test]
    fn resolves_unique_prefix() {
        let ids = [
            id("aaaa0000-0000-0000-0000-000000000000"),
            id("bbbb0000-0000-0000-0000-000000000000"),
        ];
        assert_eq!(resolve_id(ids, "AA", "goal").unwrap(), ids[0]);
        assert_eq!(
            resolve_id(ids, "bbbb0000-0000-0000-0000-000000000000", "goal").unwrap(),
            ids[1]
        );
    }

    #[test]
    fn rejects_ambiguous_and_missing() {
        let ids = [
            id("abcd0000-0000-0000-0000-000000000000"),
            id("abce0000-0000-0000-0000-000000000000"),
        ];
        assert!(matches!(
            resolve_id(ids, "abc", "task"),
            Err(LookupError::Ambiguous { count: 2, .. })
        ));
        assert!(matches!(
            resolve_id(ids, "ffff", "task"),
            Err(LookupError::NotFound { .. })
        ));
        assert!(matches!(
            resolve_id(ids, "  ", "task"),
            Err(LookupError::NotFound { .. })
        ));
    }
}
