//! Listing page discovery
//!
//! Walks `{base}{listing_path}?page=N` from page 1 and collects detail-page
//! links until a page adds nothing new, a fetch fails, or `max_pages` is hit.

use crate::config::Config;
use crate::fetch::Fetch;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::thread;
use tracing::{error, info};
use url::Url;

static LINKS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Discover detail-page URLs, sorted and de-duplicated.
///
/// Fails only when the configured base URL is invalid.
pub fn discover_links<F: Fetch>(fetcher: &F, config: &Config) -> Result<Vec<String>> {
    let base = Url::parse(&config.base_url)
        .with_context(|| format!("Invalid base URL {:?}", config.base_url))?;

    let mut links: BTreeSet<String> = BTreeSet::new();

    for page in 1..=config.max_pages {
        let page_url = base
            .join(&format!("{}?page={}", config.listing_path, page))
            .with_context(|| format!("Invalid listing path {:?}", config.listing_path))?;

        let html = match fetcher.fetch(page_url.as_str()) {
            Ok(html) => html,
            Err(e) => {
                error!("Failed to fetch {}: {}", page_url, e);
                break;
            }
        };

        let found = detail_links(&html, &base, &config.listing_path);
        let new_links: Vec<String> = found
            .into_iter()
            .filter(|link| !links.contains(link))
            .collect();
        info!("Page {} → {} new links", page, new_links.len());

        if new_links.is_empty() {
            break;
        }

        links.extend(new_links);
        thread::sleep(config.delay());
    }

    Ok(links.into_iter().collect())
}

/// Absolute, fragment-free links under `listing_path` (excluding the
/// listing itself).
pub fn detail_links(html: &str, base: &Url, listing_path: &str) -> BTreeSet<String> {
    let document = Html::parse_document(html);

    document
        .select(&LINKS)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| href.contains(listing_path) && !href.ends_with(listing_path))
        .filter_map(|href| base.join(href).ok())
        .map(|mut url| {
            url.set_fragment(None);
            url.to_string()
        })
        .collect()
}
