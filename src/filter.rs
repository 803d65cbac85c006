use crate::dates;
use crate::types::{CleanedRecord, Level, ScholarshipRecord};

/// Attach a normalized deadline to every record.
pub fn clean_deadlines(records: &[ScholarshipRecord]) -> Vec<CleanedRecord<'_>> {
    records
        .iter()
        .map(|record| CleanedRecord {
            record,
            clean_deadline: dates::normalize(&record.deadline),
        })
        .collect()
}

/// True if the `level` field mentions bachelor's study (any case).
pub fn is_bachelors(record: &ScholarshipRecord) -> bool {
    let needle = Level::Bachelor.label().to_lowercase();
    record.level.to_lowercase().contains(&needle)
}

/// Keep only bachelor's-level entries, preserving order.
pub fn bachelors_only<'a>(records: &[CleanedRecord<'a>]) -> Vec<CleanedRecord<'a>> {
    records
        .iter()
        .filter(|cleaned| is_bachelors(cleaned.record))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CleanDeadline;
    use chrono::{NaiveDate, Utc};

    fn record(url: &str, level: &str, deadline: &str) -> ScholarshipRecord {
        ScholarshipRecord {
            title: String::new(),
            url: url.to_string(),
            offered_by: String::new(),
            level: level.to_string(),
            kind: String::new(),
            amount: String::new(),
            eligibility: String::new(),
            deadline: deadline.to_string(),
            area: String::new(),
            application_link: String::new(),
            summary: String::new(),
            full_content: String::new(),
            scraped_at: Utc::now(),
        }
    }

    #[test]
    fn test_clean_deadlines_leaves_deadline_untouched() {
        let records = vec![
            record("a", "Bachelor", "Last date 15-02-2024"),
            record("b", "PhD", "N/A"),
        ];

        let cleaned = clean_deadlines(&records);

        assert_eq!(
            cleaned[0].clean_deadline,
            CleanDeadline::Date(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap())
        );
        assert_eq!(cleaned[1].clean_deadline, CleanDeadline::Unparseable);
        assert_eq!(records[0].deadline, "Last date 15-02-2024");
    }

    #[test]
    fn test_bachelors_filter() {
        let records = vec![
            record("a", "Bachelor, Masters/MPhil", ""),
            record("b", "Matric", ""),
            record("c", "", ""),
            record("d", "bachelor", ""),
        ];

        let cleaned = clean_deadlines(&records);
        let urls: Vec<&str> = bachelors_only(&cleaned)
            .iter()
            .map(|c| c.record.url.as_str())
            .collect();

        assert_eq!(urls, vec!["a", "d"]);
    }
}
