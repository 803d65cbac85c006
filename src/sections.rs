//! Heading-anchored section lookup
//!
//! Many detail pages mark sections only by a heading (`<h3>Eligibility</h3>`)
//! followed by loose paragraphs and lists, so the heading text is used as
//! the anchor and the section runs until the next heading sibling.

use crate::text::{collapse_whitespace, extract_text};
use once_cell::sync::Lazy;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

static HEADINGS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());

fn is_heading(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Text following the first heading whose lowercase text contains any of
/// `keywords`, up to the next heading. Empty when no heading matches.
pub fn locate(document: &Html, keywords: &[&str]) -> String {
    for heading in document.select(&HEADINGS) {
        let heading_text = extract_text(Some(heading)).to_lowercase();
        if keywords.iter().any(|key| heading_text.contains(key)) {
            return section_after(heading);
        }
    }
    String::new()
}

/// Non-empty `locate` result, for use in fallback chains.
pub fn locate_non_empty(document: &Html, keywords: &[&str]) -> Option<String> {
    Some(locate(document, keywords)).filter(|text| !text.is_empty())
}

fn section_after(heading: ElementRef<'_>) -> String {
    let mut content = Vec::new();

    for sibling in heading.next_siblings() {
        let piece = match sibling.value() {
            Node::Element(el) if is_heading(el.name()) => break,
            Node::Element(_) => extract_text(ElementRef::wrap(sibling)),
            Node::Text(text) => collapse_whitespace(text),
            _ => continue,
        };
        if !piece.is_empty() {
            content.push(piece);
        }
    }

    content.join(" ")
}
