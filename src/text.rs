//! Visible-text extraction for parsed HTML nodes

use scraper::node::Node;
use scraper::ElementRef;

/// Elements whose text content is never rendered.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Text of `element` and its descendants, whitespace collapsed.
///
/// Returns an empty string for `None`.
pub fn extract_text(element: Option<ElementRef<'_>>) -> String {
    let Some(element) = element else {
        return String::new();
    };

    let mut pieces = Vec::new();
    for node in element.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .map(|el| HIDDEN_ELEMENTS.contains(&el.name()))
            .unwrap_or(false);
        if !hidden {
            pieces.push(&**text);
        }
    }

    collapse_whitespace(&pieces.join(" "))
}

/// Collapse every whitespace run (NBSP included) to one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
