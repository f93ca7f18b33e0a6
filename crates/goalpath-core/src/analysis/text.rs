//! Free-text goal parsing.
//!
//! Picks a timeframe ("3 weeks", "30-day", "a month") and a daily budget
//! ("45 minutes", "1 hour a day") out of a sentence. Anything it cannot find
//! falls back to [`DEFAULT_TIMEFRAME_DAYS`] and [`DEFAULT_DAILY_MINUTES`].

use crate::strategy::{GoalCategory, ParsedGoal};

pub const DEFAULT_TIMEFRAME_DAYS: u32 = 30;
pub const DEFAULT_DAILY_MINUTES: u32 = 60;

/// Longest title kept from the free text.
const MAX_TITLE_CHARS: usize = 80;

fn number_word(word: &str) -> Option<u32> {
    let n = match word {
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "twelve" => 12,
        "fifteen" => 15,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "sixty" => 60,
        "ninety" => 90,
        _ => return word.parse().ok(),
    };
    Some(n)
}

fn day_multiplier(unit: &str) -> Option<u32> {
    match unit.trim_end_matches('s') {
        "day" => Some(1),
        "week" | "wk" => Some(7),
        "month" | "mo" => Some(30),
        "year" | "yr" => Some(365),
        _ => None,
    }
}

fn minute_multiplier(unit: &str) -> Option<u32> {
    match unit.trim_end_matches('s') {
        "minute" | "min" | "m" => Some(1),
        "hour" | "hr" | "h" => Some(60),
        _ => None,
    }
}

fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .flat_map(split_glued_unit)
        .collect()
}

/// Split tokens like `30min` or `2h` into `["30", "min"]`.
fn split_glued_unit(token: &str) -> Vec<String> {
    let digits = token.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 && digits < token.len() {
        vec![token[..digits].to_string(), token[digits..].to_string()]
    } else {
        vec![token.to_string()]
    }
}

/// Words after which "a"/"an" reads as a timeframe ("within a month")
/// rather than a rate ("30 minutes a day").
const TIMEFRAME_LEADS: &[&str] = &["in", "within", "for", "over", "next", "about"];

/// First `<number> <unit>` pair whose unit `multiplier` recognises.
///
/// Articles count as one, but only after a [`TIMEFRAME_LEADS`] word when
/// `articles_need_lead` is set.
fn find_quantity(
    tokens: &[String],
    multiplier: fn(&str) -> Option<u32>,
    articles_need_lead: bool,
) -> Option<u32> {
    (1..tokens.len()).find_map(|i| {
        let word = tokens[i - 1].as_str();
        let n = if matches!(word, "a" | "an") {
            let led = i >= 2 && TIMEFRAME_LEADS.contains(&tokens[i - 2].as_str());
            if articles_need_lead && !led {
                return None;
            }
            1
        } else {
            number_word(word)?
        };
        let m = multiplier(&tokens[i])?;
        n.checked_mul(m).filter(|v| *v > 0)
    })
}

/// Days named in `text`, e.g. `"3 weeks"` -> 21.
pub fn extract_days(text: &str) -> Option<u32> {
    find_quantity(&tokens(text), day_multiplier, true)
}

/// Minutes named in `text`: `"90 minutes"`, `"2h"`, `"an hour"`.
pub fn extract_minutes(text: &str) -> Option<u32> {
    find_quantity(&tokens(text), minute_multiplier, false)
}

/// Interpret a loose numeric field: a bare integer, or text with a unit.
pub(crate) fn loose_quantity(text: &str, extract: fn(&str) -> Option<u32>) -> Option<u32> {
    let trimmed = text.trim();
    match trimmed.parse::<u32>() {
        Ok(n) if n > 0 => Some(n),
        Ok(_) => None,
        Err(_) => extract(trimmed),
    }
}

pub(crate) fn title_from(text: &str) -> String {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    let mut title: String = line.chars().take(MAX_TITLE_CHARS).collect();
    if line.chars().count() > MAX_TITLE_CHARS {
        title = format!("{}...", title.trim_end());
    }
    title
}

/// Parse a free-text goal description into a [`ParsedGoal`].
pub fn parse_goal_text(text: &str) -> ParsedGoal {
    ParsedGoal {
        title: title_from(text),
        timeframe_days: extract_days(text).unwrap_or(DEFAULT_TIMEFRAME_DAYS),
        daily_time_minutes: extract_minutes(text).unwrap_or(DEFAULT_DAILY_MINUTES),
        category: GoalCategory::infer(text),
    }
}
