use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::types::{CleanedRecord, ScholarshipRecord};

/// Column order of the all-records CSV.
pub const CSV_COLUMNS: [&str; 12] = [
    "title",
    "url",
    "offered_by",
    "level",
    "type",
    "amount",
    "eligibility",
    "deadline",
    "area",
    "application_link",
    "summary",
    "scraped_at",
];

fn csv_row(record: &ScholarshipRecord) -> [String; 12] {
    [
        record.title.clone(),
        record.url.clone(),
        record.offered_by.clone(),
        record.level.clone(),
        record.kind.clone(),
        record.amount.clone(),
        record.eligibility.clone(),
        record.deadline.clone(),
        record.area.clone(),
        record.application_link.clone(),
        record.summary.clone(),
        record.scraped_at.to_rfc3339(),
    ]
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory {:?}", parent))?;
        }
    }
    Ok(())
}

/// Write every record, including `full_content`, as an indented JSON array.
pub fn save_json(path: &Path, records: &[ScholarshipRecord]) -> Result<()> {
    ensure_parent(path)?;
    let file = File::create(path)
        .with_context(|| format!("Failed to create {:?}", path))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)
        .with_context(|| format!("Failed to write records to {:?}", path))?;
    writer.flush()?;
    Ok(())
}

pub fn save_csv(path: &Path, records: &[ScholarshipRecord]) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {:?}", path))?;

    writer.write_record(CSV_COLUMNS)?;
    for record in records {
        writer.write_record(csv_row(record))?;
    }
    writer.flush()?;
    Ok(())
}

/// Same columns as `save_csv` plus `clean_deadline`.
pub fn save_cleaned_csv(path: &Path, records: &[CleanedRecord<'_>]) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {:?}", path))?;

    writer.write_record(CSV_COLUMNS.iter().copied().chain(["clean_deadline"]))?;
    for cleaned in records {
        let row = csv_row(cleaned.record);
        writer.write_record(
            row.into_iter()
                .chain([cleaned.clean_deadline.to_string()]),
        )?;
    }
    writer.flush()?;
    Ok(())
}
