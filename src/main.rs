use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use eduvision_scholarships::config::Config;
use eduvision_scholarships::fetch::HttpFetcher;
use eduvision_scholarships::pipeline;

#[derive(Parser)]
#[command(name = "eduvision_scholarships", about = "Scrape EduVision scholarships to JSON/CSV")]
struct Cli {
    /// YAML config file (defaults are used for missing fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site root to crawl
    #[arg(long)]
    base_url: Option<String>,

    /// Directory for the JSON and CSV outputs
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Max listing pages to walk
    #[arg(long)]
    max_pages: Option<u32>,

    /// Pause between requests in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
}

impl Cli {
    fn apply(self, mut config: Config) -> Config {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(dir) = self.output_dir {
            config.output.dir = dir;
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    // Progress to stdout, warnings and errors to stderr
    let writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .or_else(std::io::stdout);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(writer)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let config = cli.apply(config);

    let fetcher = HttpFetcher::new(&config.http).context("Failed to set up HTTP client")?;
    let summary = pipeline::run(&fetcher, &config)?;

    println!(
        "Discovered {} | scraped {} | failed {} | bachelor's {}",
        summary.discovered, summary.scraped, summary.failed, summary.bachelors
    );

    Ok(())
}
