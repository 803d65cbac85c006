//! End-to-end scraping run
//!
//! Discovery, then one detail page at a time in discovery order, then the
//! clean-deadline pass and file output. Per-page failures are logged and
//! skipped; only an empty result set changes the outcome (no files).

use crate::config::Config;
use crate::discovery::discover_links;
use crate::extract::extract_record;
use crate::fetch::Fetch;
use crate::filter::{bachelors_only, clean_deadlines};
use crate::storage;
use crate::types::ScholarshipRecord;
use anyhow::Result;
use std::path::PathBuf;
use std::thread;
use tracing::{error, info, warn};

#[derive(Debug, Default)]
pub struct RunSummary {
    pub discovered: usize,
    pub scraped: usize,
    pub failed: usize,
    pub bachelors: usize,
    /// Files written, empty when nothing was scraped
    pub outputs: Vec<PathBuf>,
}

/// Fetch and extract one detail page; `None` when the fetch failed.
pub fn scrape_detail<F: Fetch>(fetcher: &F, url: &str) -> Option<ScholarshipRecord> {
    match fetcher.fetch(url) {
        Ok(html) => Some(extract_record(url, &html)),
        Err(e) => {
            error!("Failed to fetch {}: {}", url, e);
            None
        }
    }
}

pub fn run<F: Fetch>(fetcher: &F, config: &Config) -> Result<RunSummary> {
    info!("Discovering scholarship links...");
    let links = discover_links(fetcher, config)?;
    info!("Found {} links", links.len());

    let mut summary = RunSummary {
        discovered: links.len(),
        ..RunSummary::default()
    };

    let mut records = Vec::new();
    for (i, link) in links.iter().enumerate() {
        info!("[{}/{}] Scraping {}", i + 1, links.len(), link);
        match scrape_detail(fetcher, link) {
            Some(record) => records.push(record),
            None => summary.failed += 1,
        }
        thread::sleep(config.delay());
    }
    summary.scraped = records.len();

    if records.is_empty() {
        warn!("No scholarships scraped!");
        return Ok(summary);
    }

    let output = &config.output;
    storage::save_json(&output.json_path(), &records)?;
    storage::save_csv(&output.csv_path(), &records)?;

    let cleaned = clean_deadlines(&records);
    let bachelors = bachelors_only(&cleaned);
    storage::save_cleaned_csv(&output.bachelors_path(), &bachelors)?;
    summary.bachelors = bachelors.len();

    summary.outputs = vec![
        output.json_path(),
        output.csv_path(),
        output.bachelors_path(),
    ];
    info!(
        "Saved → {}",
        summary
            .outputs
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(summary)
}
