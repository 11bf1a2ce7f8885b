//! Caller-side input validation.
//!
//! The storage layer accepts whatever it is given. Everything a user types
//! is checked here first: names must not be blank, dates and flags are
//! parsed from a few friendly spellings, and settings values are normalized
//! to their stored form (`"0"`/`"1"` flags, clamped day counts).

use crate::defaults::{clamp_upcoming_days, DefaultSetting};
use crate::error::{Error, Result};
use chrono::{Days, NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::sync::LazyLock;

// ── Synonym maps ─────────────────────────────────────────────

pub static FLAG_SYNONYMS: LazyLock<HashMap<&str, bool>> = LazyLock::new(|| {
    [
        ("1", true),
        ("on", true),
        ("yes", true),
        ("y", true),
        ("true", true),
        ("enable", true),
        ("enabled", true),
        ("0", false),
        ("off", false),
        ("no", false),
        ("n", false),
        ("false", false),
        ("disable", false),
        ("disabled", false),
    ]
    .into_iter()
    .collect()
});

/// Short names accepted for the required settings.
pub static SETTING_SYNONYMS: LazyLock<HashMap<&str, DefaultSetting>> = LazyLock::new(|| {
    [
        ("upcoming", DefaultSetting::UpcomingThreshold),
        ("upcoming-days", DefaultSetting::UpcomingThreshold),
        ("threshold", DefaultSetting::UpcomingThreshold),
        ("badges", DefaultSetting::EnableNums),
        ("nums", DefaultSetting::EnableNums),
        ("counters", DefaultSetting::EnableNums),
        ("monospace", DefaultSetting::EnableMonospace),
        ("mono", DefaultSetting::EnableMonospace),
    ]
    .into_iter()
    .collect()
});

/// Relative day keywords for due dates.
pub static DATE_KEYWORDS: LazyLock<HashMap<&str, i64>> = LazyLock::new(|| {
    [("yesterday", -1), ("today", 0), ("tomorrow", 1)]
        .into_iter()
        .collect()
});

/// Words that clear a due date.
const CLEAR_WORDS: [&str; 4] = ["none", "clear", "never", "-"];

// ── Names ────────────────────────────────────────────────────

/// Trim a project name or item title and reject it if blank.
///
/// # Errors
///
/// Returns `InvalidArgument` if nothing is left after trimming.
pub fn validate_name(kind: &str, input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidArgument(format!("{kind} must not be empty")));
    }
    Ok(trimmed.to_string())
}

// ── Dates ────────────────────────────────────────────────────

/// Parse a due date relative to `today`.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM`, `today`, `tomorrow`,
/// `yesterday`, `+Nd` / `+Nw`, and `none` to clear. Dates without a time
/// land at midnight.
///
/// # Errors
///
/// Returns `InvalidArgument` for anything else.
pub fn parse_due_date(input: &str, today: NaiveDate) -> Result<Option<NaiveDateTime>> {
    let lower = input.trim().to_lowercase();
    let invalid = || Error::InvalidArgument(format!("invalid date '{input}'"));

    if CLEAR_WORDS.contains(&lower.as_str()) {
        return Ok(None);
    }

    let day = if let Some(&offset) = DATE_KEYWORDS.get(lower.as_str()) {
        shift(today, offset).ok_or_else(invalid)?
    } else if let Some(rest) = lower.strip_prefix('+') {
        let unit = rest.chars().last().ok_or_else(invalid)?;
        let count: i64 = rest[..rest.len() - unit.len_utf8()]
            .parse()
            .map_err(|_| invalid())?;
        let days = match unit {
            'd' => count,
            'w' => count.checked_mul(7).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };
        shift(today, days).ok_or_else(invalid)?
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(&lower, "%Y-%m-%d %H:%M") {
        return Ok(Some(dt));
    } else {
        NaiveDate::parse_from_str(&lower, "%Y-%m-%d").map_err(|_| invalid())?
    };

    Ok(day.and_hms_opt(0, 0, 0))
}

fn shift(day: NaiveDate, offset: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(offset.unsigned_abs());
    if offset >= 0 {
        day.checked_add_days(magnitude)
    } else {
        day.checked_sub_days(magnitude)
    }
}

// ── Flags and settings ───────────────────────────────────────

/// Parse an on/off style flag.
///
/// # Errors
///
/// Returns `InvalidArgument` if the word is not a known flag spelling.
pub fn parse_flag(input: &str) -> Result<bool> {
    FLAG_SYNONYMS
        .get(input.trim().to_lowercase().as_str())
        .copied()
        .ok_or_else(|| Error::InvalidArgument(format!("invalid flag '{input}'")))
}

/// Map a user-typed key onto a stored setting key.
///
/// Known keys match case-insensitively, short names go through
/// [`SETTING_SYNONYMS`], and anything else is returned unchanged (the
/// settings table is free-form).
#[must_use]
pub fn resolve_setting_key(input: &str) -> String {
    let trimmed = input.trim();
    if let Some(known) = DefaultSetting::from_key(&trimmed.to_uppercase()) {
        return known.key().to_string();
    }
    if let Some(known) = SETTING_SYNONYMS.get(trimmed.to_lowercase().as_str()) {
        return known.key().to_string();
    }
    trimmed.to_string()
}

/// Normalize a value for storage under `key`.
///
/// The upcoming window must be a whole number and is clamped to `[1, 70]`; flags become
/// `"0"`/`"1"`. Other keys keep their value verbatim.
///
/// # Errors
///
/// Returns `InvalidArgument` if a required setting gets a malformed value.
pub fn normalize_setting_value(key: &str, value: &str) -> Result<String> {
    match DefaultSetting::from_key(key) {
        Some(DefaultSetting::UpcomingThreshold) => {
            let days: i64 = value.trim().parse().map_err(|_| {
                Error::InvalidArgument(format!(
                    "upcoming window must be a whole number of days, got '{value}'"
                ))
            })?;
            Ok(clamp_upcoming_days(days).to_string())
        }
        Some(DefaultSetting::EnableNums | DefaultSetting::EnableMonospace) => {
            let stored = if parse_flag(value)? { "1" } else { "0" };
            Ok(stored.to_string())
        }
        None => Ok(value.to_string()),
    }
}

// ── Levenshtein distance ─────────────────────────────────────

/// Compute the Levenshtein edit distance between two strings.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Find existing setting keys similar to the searched one.
///
/// Returns up to `max` suggestions with edit distance ≤ 3, sorted by
/// distance then alphabetically. Comparison ignores case.
#[must_use]
pub fn find_similar_keys(searched: &str, existing: &[String], max: usize) -> Vec<String> {
    let searched = searched.to_uppercase();
    let mut candidates: Vec<(usize, &str)> = existing
        .iter()
        .map(|key| (levenshtein_distance(&searched, &key.to_uppercase()), key.as_str()))
        .filter(|(dist, _)| *dist <= 3)
        .collect();

    candidates.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    candidates
        .into_iter()
        .take(max)
        .map(|(_, key)| key.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn midnight(y: i32, m: u32, d: u32) -> Option<NaiveDateTime> {
        date(y, m, d).and_hms_opt(0, 0, 0)
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("name", "  Groceries ").unwrap(), "Groceries");
        assert!(matches!(
            validate_name("name", "   "),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parse_due_date_forms() {
        let today = date(2024, 1, 31);

        assert_eq!(parse_due_date("2024-01-15", today).unwrap(), midnight(2024, 1, 15));
        assert_eq!(parse_due_date("Tomorrow", today).unwrap(), midnight(2024, 2, 1));
        assert_eq!(parse_due_date("yesterday", today).unwrap(), midnight(2024, 1, 30));
        assert_eq!(parse_due_date("+3d", today).unwrap(), midnight(2024, 2, 3));
        assert_eq!(parse_due_date("+2w", today).unwrap(), midnight(2024, 2, 14));
        assert_eq!(parse_due_date("none", today).unwrap(), None);
        assert_eq!(
            parse_due_date("2024-01-15 08:30", today).unwrap(),
            date(2024, 1, 15).and_hms_opt(8, 30, 0)
        );
    }

    #[test]
    fn test_parse_due_date_rejects_garbage() {
        let today = date(2024, 1, 31);
        for bad in ["someday", "2024-13-01", "+x", "+3m", "+", ""] {
            assert!(parse_due_date(bad, today).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("ON").unwrap());
        assert!(parse_flag("1").unwrap());
        assert!(!parse_flag("no").unwrap());
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn test_resolve_setting_key() {
        assert_eq!(resolve_setting_key("upcomingthreshold"), "UPCOMINGTHRESHOLD");
        assert_eq!(resolve_setting_key("badges"), "ENABLENUMS");
        assert_eq!(resolve_setting_key("Mono"), "ENABLEMONOSPACE");
        assert_eq!(resolve_setting_key("theme"), "theme");
    }

    #[test]
    fn test_normalize_setting_value() {
        assert_eq!(normalize_setting_value("UPCOMINGTHRESHOLD", "0").unwrap(), "1");
        assert_eq!(normalize_setting_value("UPCOMINGTHRESHOLD", "14").unwrap(), "14");
        assert_eq!(normalize_setting_value("UPCOMINGTHRESHOLD", "1000").unwrap(), "70");
        assert_eq!(normalize_setting_value("UPCOMINGTHRESHOLD", " 14 ").unwrap(), "14");
        assert_eq!(normalize_setting_value("UPCOMINGTHRESHOLD", "-5").unwrap(), "1");
        for bad in ["soon", "7.5", "1e3", "7 days", ""] {
            assert!(
                matches!(
                    normalize_setting_value("UPCOMINGTHRESHOLD", bad),
                    Err(Error::InvalidArgument(_))
                ),
                "accepted {bad:?}"
            );
        }
        assert_eq!(normalize_setting_value("ENABLENUMS", "off").unwrap(), "0");
        assert_eq!(normalize_setting_value("ENABLEMONOSPACE", "yes").unwrap(), "1");
        assert_eq!(normalize_setting_value("theme", "Dark").unwrap(), "Dark");
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", "abd"), 1);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_find_similar_keys() {
        let keys = vec![
            "ENABLEMONOSPACE".to_string(),
            "ENABLENUMS".to_string(),
            "UPCOMINGTHRESHOLD".to_string(),
        ];
        let result = find_similar_keys("enablenum", &keys, 3);
        assert_eq!(result, vec!["ENABLENUMS".to_string()]);
    }
}
