//! Run configuration
//!
//! Defaults target eduvision.edu.pk. A YAML file may override any subset of
//! fields; the binary applies command-line overrides on top.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Site root, e.g. `https://www.eduvision.edu.pk`
    pub base_url: String,
    /// Listing path; also the path fragment detail links must contain
    pub listing_path: String,
    pub max_pages: u32,
    /// Pause between consecutive network calls
    pub delay_ms: u64,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// Seconds; retry `n` (0-based) waits `backoff_factor * 2^n`
    pub backoff_factor: f64,
    pub retry_statuses: Vec<u16>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub json_file: String,
    pub csv_file: String,
    pub bachelors_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://www.eduvision.edu.pk".to_string(),
            listing_path: "/scholarships/".to_string(),
            max_pages: 100,
            delay_ms: 1200,
            http: HttpConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "eduvision-scraper/1.0".to_string(),
            timeout_secs: 20,
            max_retries: 5,
            backoff_factor: 0.5,
            retry_statuses: vec![500, 502, 503, 504],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            json_file: "eduvision_scholarships.json".to_string(),
            csv_file: "eduvision_scholarships.csv".to_string(),
            bachelors_file: "bachelors_scholarships.csv".to_string(),
        }
    }
}

impl Config {
    /// Load from a YAML file, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config YAML {:?}", path))?;

        Ok(config)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Wait before retry number `attempt` (0-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = self.backoff_factor * 2f64.powi(exponent);
        Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX)
    }
}

impl OutputConfig {
    pub fn json_path(&self) -> PathBuf {
        self.dir.join(&self.json_file)
    }

    pub fn csv_path(&self) -> PathBuf {
        self.dir.join(&self.csv_file)
    }

    pub fn bachelors_path(&self) -> PathBuf {
        self.dir.join(&self.bachelors_file)
    }
}
