//! Phase-based plans: one entry per chunk of days, keyed to the chunk's end.

use super::{DailyTask, GoalCategory, ParsedGoal, StrategyError};

/// Smallest chunk length in days.
pub const MIN_CHUNK_DAYS: u32 = 3;

/// Target number of milestones for long timeframes.
const TARGET_MILESTONES: u32 = 4;

/// Named phases used when a word of the goal title is one of the keywords.
struct PhaseCatalog {
    category: GoalCategory,
    keywords: &'static [&'static str],
    phases: &'static [(&'static str, &'static str)],
}

const CATALOGS: &[PhaseCatalog] = &[
    PhaseCatalog {
        category: GoalCategory::Learning,
        keywords: &["language", "spanish", "french", "german", "japanese", "italian", "chinese"],
        phases: &[
            ("Sounds and Basics", "Pronunciation, greetings, and the most common words"),
            ("Core Vocabulary", "Everyday vocabulary and simple sentence patterns"),
            ("Conversation", "Short dialogues and speaking practice"),
            ("Fluency", "Reading, listening, and free conversation"),
        ],
    },
    PhaseCatalog {
        category: GoalCategory::Fitness,
        keywords: &[
            "run", "running", "runner", "marathon", "5k", "10k", "fitness", "workout", "gym",
            "strength",
        ],
        phases: &[
            ("Base Building", "Easy sessions to build a consistent base"),
            ("Endurance", "Gradually extend session length"),
            ("Intensity", "Add speed and strength work"),
            ("Peak and Taper", "Hit peak load, then recover for the finish"),
        ],
    },
    PhaseCatalog {
        category: GoalCategory::Learning,
        keywords: &[
            "code", "coding", "programming", "rust", "python", "javascript", "develop",
            "developer", "development", "app", "apps",
        ],
        phases: &[
            ("Setup and Fundamentals", "Tooling, syntax, and first small programs"),
            ("Core Concepts", "Data structures, control flow, and idioms"),
            ("Build a Project", "Apply what you learned to a real project"),
            ("Polish and Ship", "Tests, cleanup, and sharing the result"),
        ],
    },
    PhaseCatalog {
        category: GoalCategory::Creative,
        keywords: &["write", "writing", "novel", "book", "blog", "essay", "story"],
        phases: &[
            ("Outline", "Ideas, structure, and a working outline"),
            ("First Draft", "Get the full draft down without editing"),
            ("Revision", "Restructure and strengthen the draft"),
            ("Final Edit", "Line edits and a finished manuscript"),
        ],
    },
    PhaseCatalog {
        category: GoalCategory::Creative,
        keywords: &["guitar", "piano", "violin", "music", "sing", "drum"],
        phases: &[
            ("Technique Basics", "Posture, scales, and fundamental technique"),
            ("Simple Pieces", "Learn a few short pieces end to end"),
            ("Repertoire", "Expand to longer, harder pieces"),
            ("Performance", "Play complete pieces for an audience"),
        ],
    },
];

/// Chunk length for `timeframe_days`: `max(3, floor(timeframe_days / 4))`.
pub fn chunk_size(timeframe_days: u32) -> u32 {
    (timeframe_days / TARGET_MILESTONES).max(MIN_CHUNK_DAYS)
}

/// Phases for `goal`, matched on whole title words. When several catalogs
/// match, the one agreeing with the inferred category wins.
fn phases_for(goal: &ParsedGoal) -> &'static [(&'static str, &'static str)] {
    let lower = goal.title.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let matching: Vec<&PhaseCatalog> = CATALOGS
        .iter()
        .filter(|c| c.keywords.iter().any(|k| words.contains(k)))
        .collect();

    matching
        .iter()
        .find(|c| c.category == goal.category)
        .or_else(|| matching.first())
        .map(|c| c.phases)
        .unwrap_or(&[])
}

pub fn generate(goal: &ParsedGoal) -> Result<Vec<DailyTask>, StrategyError> {
    goal.validate()?;

    let n = goal.timeframe_days;
    let chunk = chunk_size(n);
    let count = n.div_ceil(chunk);
    let phases = phases_for(goal);

    let plan = (0..count)
        .map(|i| {
            let number = i + 1;
            let start = i * chunk + 1;
            let end = (number * chunk).min(n);
            let (title, description) = match phases.get(i as usize) {
                Some((title, description)) => (title.to_string(), description.to_string()),
                None => (
                    format!("Milestone {number}"),
                    format!("Complete phase {number} of {}", goal.title),
                ),
            };
            DailyTask {
                day: end,
                task: format!("Days {start}-{end}: {title} - {description}"),
                duration: goal.daily_time_minutes,
                notes: Some(format!("Milestone {number} of {count}")),
            }
        })
        .collect();

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_size_has_floor_of_three() {
        assert_eq!(chunk_size(2), 3);
        assert_eq!(chunk_size(15), 3);
        assert_eq!(chunk_size(30), 7);
    }

    #[test]
    fn short_timeframe_is_single_chunk() {
        let goal = ParsedGoal::new("Tidy the garage", 2, 30);
        let plan = generate(&goal).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].day, 2);
        assert!(plan[0].task.starts_with("Days 1-2: Milestone 1"));
    }

    #[test]
    fn keyword_phases_then_generic_fallback() {
        let goal = ParsedGoal::new("Learn Spanish", 15, 30);
        let plan = generate(&goal).unwrap();
        assert_eq!(plan.len(), 5);
        assert_eq!(
            plan[0].task,
            "Days 1-3: Sounds and Basics - Pronunciation, greetings, and the most common words"
        );
        assert!(plan[4].task.starts_with("Days 13-15: Milestone 5 - Complete phase 5"));
    }

    #[test]
    fn keywords_match_whole_words_only() {
        let brunch = ParsedGoal::new("Host a happy brunch", 15, 30);
        let plan = generate(&brunch).unwrap();
        assert!(plan[0].task.starts_with("Days 1-3: Milestone 1"), "{}", plan[0].task);

        let app = ParsedGoal::new("Ship my first app", 15, 30);
        let plan = generate(&app).unwrap();
        assert!(plan[0].task.starts_with("Days 1-3: Setup and Fundamentals"));
    }

    #[test]
    fn inferred_category_breaks_ties() {
        // "write" (creative) and "code" (learning) both match; "learn" makes it learning.
        let goal = ParsedGoal::new("Learn to write code", 15, 30);
        assert_eq!(goal.category, GoalCategory::Learning);
        let plan = generate(&goal).unwrap();
        assert!(plan[0].task.starts_with("Days 1-3: Setup and Fundamentals"));

        let mut novel = ParsedGoal::new("Write a novel about code", 15, 30);
        novel.category = GoalCategory::Creative;
        let plan = generate(&novel).unwrap();
        assert!(plan[0].task.starts_with("Days 1-3: Outline"));
    }

    #[test]
    fn last_chunk_is_truncated() {
        let goal = ParsedGoal::new("Paint a mural", 30, 90);
        let plan = generate(&goal).unwrap();
        // chunk 7: 1-7, 8-14, 15-21, 22-28, 29-30
        let days: Vec<u32> = plan.iter().map(|t| t.day).collect();
        assert_eq!(days, vec![7, 14, 21, 28, 30]);
        assert!(plan[4].task.starts_with("Days 29-30"));
    }
}
