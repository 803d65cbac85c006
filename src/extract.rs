//! Detail page field extraction
//!
//! Builds one `ScholarshipRecord` from a detail page. Each field is looked
//! up independently:
//! - label regexes over the full page text first (deadline, area)
//! - heading-anchored sections as the fallback or primary source
//! - keyword tagging of the whole text for level and type
//!
//! Nothing here fails; a field that cannot be found is left empty.

use crate::patterns::{
    self, AMOUNT_HEADINGS, AREA_HEADINGS, DEADLINE_HEADINGS, ELIGIBILITY_HEADINGS,
    OFFERED_BY_HEADINGS,
};
use crate::sections::{locate, locate_non_empty};
use crate::text::extract_text;
use crate::types::ScholarshipRecord;
use chrono::Utc;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Title sources, most specific first.
const TITLE_SELECTORS: &[&str] = &["h1", ".post-title", "title"];

/// Main content containers, most specific first.
const CONTENT_SELECTORS: &[&str] = &["article", "#content", "body"];

static ANCHORS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Extract every field of a detail page.
pub fn extract_record(url: &str, html: &str) -> ScholarshipRecord {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let full_content = main_content(&document);

    let deadline = patterns::labelled_deadline(&full_content)
        .or_else(|| locate_non_empty(&document, DEADLINE_HEADINGS))
        .unwrap_or_default();

    let area = patterns::labelled_area(&full_content)
        .or_else(|| locate_non_empty(&document, AREA_HEADINGS))
        .unwrap_or_default();

    ScholarshipRecord {
        title,
        url: url.to_string(),
        offered_by: locate(&document, OFFERED_BY_HEADINGS),
        level: patterns::level_field(&full_content),
        kind: patterns::funding_type(&full_content)
            .map(|kind| kind.label().to_string())
            .unwrap_or_default(),
        amount: locate(&document, AMOUNT_HEADINGS),
        eligibility: locate(&document, ELIGIBILITY_HEADINGS),
        deadline,
        area,
        application_link: application_link(&document, url).unwrap_or_default(),
        summary: patterns::summarize(&full_content),
        full_content,
        scraped_at: Utc::now(),
    }
}

fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

/// First non-empty text among the page heading, post title and `<title>`.
pub fn extract_title(document: &Html) -> String {
    TITLE_SELECTORS
        .iter()
        .map(|css| extract_text(select_first(document, css)))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// Normalized text of the first content container that exists.
pub fn main_content(document: &Html) -> String {
    let container = CONTENT_SELECTORS
        .iter()
        .find_map(|css| select_first(document, css))
        .unwrap_or_else(|| document.root_element());

    extract_text(Some(container)).replace('\u{a0}', " ")
}

/// First anchor whose text mentions applying, resolved against the page URL.
pub fn application_link(document: &Html, page_url: &str) -> Option<String> {
    let base = Url::parse(page_url).ok();

    document
        .select(&ANCHORS)
        .filter(|anchor| patterns::is_apply_text(&extract_text(Some(*anchor))))
        .find_map(|anchor| {
            let href = anchor.value().attr("href")?;
            resolve(base.as_ref(), href)
        })
}

fn resolve(base: Option<&Url>, href: &str) -> Option<String> {
    match base {
        Some(base) => base.join(href).ok().map(String::from),
        None => Url::parse(href).ok().map(String::from),
    }
}
