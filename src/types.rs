use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One scholarship detail page, as extracted.
///
/// Every free-text field uses the empty string when nothing was found.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScholarshipRecord {
    pub title: String,
    pub url: String,
    pub offered_by: String,
    pub level: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub eligibility: String,
    pub deadline: String,
    pub area: String,
    pub application_link: String,
    pub summary: String,
    pub full_content: String,
    pub scraped_at: DateTime<Utc>,
}

/// A record paired with its normalized deadline.
///
/// Produced by the post-processing pass over the whole collected set; the
/// record itself is never modified.
#[derive(Debug, Clone, Copy)]
pub struct CleanedRecord<'a> {
    pub record: &'a ScholarshipRecord,
    pub clean_deadline: CleanDeadline,
}

/// Result of deadline normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanDeadline {
    Date(NaiveDate),
    Unparseable,
}

impl fmt::Display for CleanDeadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanDeadline::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            // Written as an empty cell, same as a missing value
            CleanDeadline::Unparseable => Ok(()),
        }
    }
}

/// Study level vocabulary used for the `level` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Matric,
    Intermediate,
    Bachelor,
    Masters,
    PhD,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Matric,
        Level::Intermediate,
        Level::Bachelor,
        Level::Masters,
        Level::PhD,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Level::Matric => "Matric",
            Level::Intermediate => "Intermediate",
            Level::Bachelor => "Bachelor",
            Level::Masters => "Masters/MPhil",
            Level::PhD => "PhD",
        }
    }
}

/// Merit/need classification for the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundingType {
    MeritAndNeed,
    Merit,
    Need,
}

impl FundingType {
    pub fn label(&self) -> &'static str {
        match self {
            FundingType::MeritAndNeed => "Merit & Need Based",
            FundingType::Merit => "Merit Based",
            FundingType::Need => "Need Based",
        }
    }
}
