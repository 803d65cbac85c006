//! Deadline normalization
//!
//! Turns free-text deadlines ("Last date: 15-02-2024", "March 31st, 2025",
//! "N/A") into calendar dates. Parsing is an ordered list of strategies,
//! each of which may decline:
//! 1. Numeric dates (`15-02-2024`, `2024/2/15`), day-first
//! 2. Month-name dates embedded in prose (`31 March 2025`, `Feb-15-2024`),
//!    then dotted dates, then a lone year
//!
//! Anything left over is `CleanDeadline::Unparseable`.

use crate::types::CleanDeadline;
use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Prefixes that mark a deadline as not applicable.
const NOT_APPLICABLE: &[&str] = &["n.a", "na", "n/a"];

type Strategy = fn(&str, NaiveDate) -> Option<NaiveDate>;

const STRATEGIES: &[Strategy] = &[numeric_date, natural_language_date];

const MONTHS: &str = "jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sept?(?:ember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2}[-/]\d{1,2}[-/]\d{2,4}|\d{4}[-/]\d{1,2}[-/]\d{1,2})").unwrap()
});

static DATE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-/]").unwrap());

// 15 March 2024, 15th of March, 2024, 15 Mar, 15/Feb/2024
static DAY_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s*(?:of\s+)?[-/\s]?({MONTHS})\b\.?(?:[,\s/-]+(\d{{4}}))?"
    ))
    .unwrap()
});

// March 15, 2024, March 15th 2024, Mar 15, March 2024, Feb-15-2024
static MONTH_DAY_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b({MONTHS})\b\.?(?:[-/\s]+(\d{{1,2}})(?:st|nd|rd|th)?\b)?(?:,?[-/\s]+(\d{{4}}))?"
    ))
    .unwrap()
});

static MONTH_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\b({MONTHS})\b")).unwrap());

// 15.02.2024 or 2024.02.15
static DOTTED_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:(\d{1,2})\.(\d{1,2})\.(\d{4})|(\d{4})\.(\d{1,2})\.(\d{1,2}))\b").unwrap()
});

static BARE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").unwrap());

/// Normalize a deadline relative to today's date (UTC).
pub fn normalize(text: &str) -> CleanDeadline {
    normalize_at(text, Utc::now().date_naive())
}

/// Normalize a deadline; `today` fills in missing year/day components and
/// anchors two-digit years.
pub fn normalize_at(text: &str, today: NaiveDate) -> CleanDeadline {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return CleanDeadline::Unparseable;
    }

    let lower = trimmed.to_lowercase();
    if NOT_APPLICABLE.iter().any(|prefix| lower.starts_with(prefix)) {
        return CleanDeadline::Unparseable;
    }

    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(trimmed, today))
        .map(CleanDeadline::Date)
        .unwrap_or(CleanDeadline::Unparseable)
}

/// First `D-M-Y` or `Y-M-D` group in the text. Day-first wins when both
/// readings are valid.
fn numeric_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let found = NUMERIC_DATE.find(text)?;
    let parts: Vec<&str> = DATE_SEPARATOR.split(found.as_str()).collect();
    let [first, second, third] = parts.as_slice() else {
        return None;
    };

    if first.len() == 4 {
        let year: i32 = first.parse().ok()?;
        let a: u32 = second.parse().ok()?;
        let b: u32 = third.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, a, b)
            .or_else(|| NaiveDate::from_ymd_opt(year, b, a));
    }

    let year = resolve_year(third, today)?;
    let a: u32 = first.parse().ok()?;
    let b: u32 = second.parse().ok()?;
    NaiveDate::from_ymd_opt(year, b, a).or_else(|| NaiveDate::from_ymd_opt(year, a, b))
}

/// Month-name, dotted and bare-year dates anywhere in the text. Declines
/// when the text names more than one distinct month.
fn natural_language_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let mut months = MONTH_WORD
        .captures_iter(text)
        .filter_map(|caps| month_number(&caps[1]));
    if let Some(first) = months.next() {
        if months.any(|month| month != first) {
            return None;
        }
    }

    let candidates = [
        DAY_MONTH_YEAR.captures(text).and_then(|caps| {
            let day: u32 = caps[1].parse().ok()?;
            let month = month_number(&caps[2])?;
            let year = caps.get(3).and_then(|y| y.as_str().parse().ok());
            Some((caps.get(0)?.start(), year, month, Some(day)))
        }),
        MONTH_DAY_YEAR.captures(text).and_then(|caps| {
            let month = month_number(&caps[1])?;
            let day = caps.get(2).and_then(|d| d.as_str().parse().ok());
            let year = caps.get(3).and_then(|y| y.as_str().parse().ok());
            Some((caps.get(0)?.start(), year, month, day))
        }),
    ];

    // Earliest mention in the text wins
    let named = candidates
        .into_iter()
        .flatten()
        .min_by_key(|(start, ..)| *start)
        .and_then(|(_, year, month, day)| build_date(year, month, day, today));

    named
        .or_else(|| dotted_date(text))
        .or_else(|| bare_year(text, today))
}

/// `D.M.Y` is read month-first, `Y.M.D` year-first; each swaps when invalid.
fn dotted_date(text: &str) -> Option<NaiveDate> {
    let caps = DOTTED_DATE.captures(text)?;
    let (year, a, b) = match caps.get(4) {
        Some(year) => (year.as_str(), &caps[5], &caps[6]),
        None => (&caps[3], &caps[1], &caps[2]),
    };
    let year: i32 = year.parse().ok()?;
    let a: u32 = a.parse().ok()?;
    let b: u32 = b.parse().ok()?;
    NaiveDate::from_ymd_opt(year, a, b).or_else(|| NaiveDate::from_ymd_opt(year, b, a))
}

/// A lone year takes today's month and day.
fn bare_year(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let year: i32 = BARE_YEAR.captures(text)?[1].parse().ok()?;
    build_date(Some(year), today.month(), None, today)
}

/// Fill missing components from `today`, clamping the day to the month.
fn build_date(year: Option<i32>, month: u32, day: Option<u32>, today: NaiveDate) -> Option<NaiveDate> {
    let year = year.unwrap_or(today.year());
    let day = day.unwrap_or(today.day());
    if day == 0 || day > 31 {
        return None;
    }
    let day = day.min(days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day)
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

/// Four-digit years as-is; two-digit years land within 50 years of today.
fn resolve_year(digits: &str, today: NaiveDate) -> Option<i32> {
    let value: i32 = digits.parse().ok()?;
    match digits.len() {
        4 => Some(value),
        2 => {
            let current = today.year();
            let mut year = value + current / 100 * 100;
            if year >= current + 50 {
                year -= 100;
            } else if year < current - 50 {
                year += 100;
            }
            Some(year)
        }
        _ => None,
    }
}

fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let month = match lower.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
