//! Text-level extraction rules
//!
//! Pure functions over the normalized page text. Each rule either yields a
//! value or declines, and the extractor chains them with heading-based
//! fallbacks. Keyword lists live here so the rules stay data-driven.

use crate::types::{FundingType, Level};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

pub const DEADLINE_HEADINGS: &[&str] = &["deadline", "last date", "apply by", "closing date"];
pub const ELIGIBILITY_HEADINGS: &[&str] = &["eligib", "criteria", "requirements", "who can apply"];
pub const AMOUNT_HEADINGS: &[&str] = &["amount", "coverage", "stipend", "funding"];
pub const AREA_HEADINGS: &[&str] = &["area", "region", "province"];
pub const OFFERED_BY_HEADINGS: &[&str] = &["offered by", "organization", "provider", "sponsored"];

/// Anchor text that marks an application link.
pub const APPLY_KEYWORDS: &[&str] = &["apply", "application", "form"];

/// Number of sentences kept in the summary.
pub const SUMMARY_SENTENCES: usize = 3;

static DEADLINE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(last date|deadline|apply by)\s*:?([^\n\r]+)").unwrap());

static AREA_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Area\s*:?([A-Za-z ,&\-]+)(Deadline|$)").unwrap());

static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

static MATRIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bmatric\b").unwrap());
static INTERMEDIATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\binter\b|intermediate").unwrap());
static BACHELOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bbachelor|undergrad").unwrap());
static MASTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bms|m\.phil|master").unwrap());
static PHD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bphd|doctoral").unwrap());

fn level_pattern(level: Level) -> &'static Regex {
    match level {
        Level::Matric => &MATRIC,
        Level::Intermediate => &INTERMEDIATE,
        Level::Bachelor => &BACHELOR,
        Level::Masters => &MASTERS,
        Level::PhD => &PHD,
    }
}

/// Text after a `Last date:` / `Deadline:` / `Apply by:` label, to end of line.
pub fn labelled_deadline(text: &str) -> Option<String> {
    DEADLINE_LABEL
        .captures(text)
        .map(|caps| caps[2].trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Letters, spaces and `,&-` after an `Area:` label, stopping at `Deadline`
/// or end of text.
pub fn labelled_area(text: &str) -> Option<String> {
    AREA_LABEL
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Study levels mentioned anywhere in `text`.
pub fn detect_levels(text: &str) -> Vec<Level> {
    let lower = text.to_lowercase();
    Level::ALL
        .into_iter()
        .filter(|level| level_pattern(*level).is_match(&lower))
        .collect()
}

/// `level` field value: matched labels, sorted, de-duplicated, comma-joined.
pub fn level_field(text: &str) -> String {
    let labels: BTreeSet<&'static str> = detect_levels(text)
        .into_iter()
        .map(|level| level.label())
        .collect();
    labels.into_iter().collect::<Vec<_>>().join(", ")
}

pub fn funding_type(text: &str) -> Option<FundingType> {
    let lower = text.to_lowercase();
    match (lower.contains("merit"), lower.contains("need")) {
        (true, true) => Some(FundingType::MeritAndNeed),
        (true, false) => Some(FundingType::Merit),
        (false, true) => Some(FundingType::Need),
        (false, false) => None,
    }
}

/// Split into sentence-like chunks at whitespace following `.`, `!` or `?`.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK.find_iter(text) {
        // Keep the punctuation with the sentence it ends
        chunks.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    chunks.push(&text[start..]);

    chunks
}

pub fn summarize(text: &str) -> String {
    sentences(text)
        .into_iter()
        .take(SUMMARY_SENTENCES)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// True if the anchor text signals an application link.
pub fn is_apply_text(anchor_text: &str) -> bool {
    let lower = anchor_text.to_lowercase();
    APPLY_KEYWORDS.iter().any(|key| lower.contains(key))
}
