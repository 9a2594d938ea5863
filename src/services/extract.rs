// src/services/extract.rs

//! Embedded metadata extraction.
//!
//! Detail pages embed their bibliographic data as an inline
//! `var metadata = {...};` assignment inside a script element. The
//! extractor locates that script, cuts the JSON object out of it, and
//! parses it into [`EmbeddedMetadata`].

use regex::Regex;
use scraper::{Html, Selector};

use crate::models::EmbeddedMetadata;

/// Result of scanning a response body for the metadata block.
#[derive(Debug, Clone)]
pub enum Extraction {
    /// Parsed payload
    Found(EmbeddedMetadata),

    /// No script on the page carries a metadata assignment
    Missing,

    /// The block is present but its payload did not parse
    Malformed(String),
}

/// Scan an HTML body for the embedded metadata payload.
pub fn extract_metadata(body: &str) -> Extraction {
    let document = Html::parse_document(body);
    let script_selector = Selector::parse("script").expect("static selector");

    for script in document.select(&script_selector) {
        let text: String = script.text().collect();
        if !text.contains("var metadata") {
            continue;
        }

        let Some(payload) = cut_payload(&text) else {
            return Extraction::Malformed(
                "Metadata assignment could not be isolated".to_string(),
            );
        };
        return match serde_json::from_str::<EmbeddedMetadata>(&payload) {
            Ok(meta) => Extraction::Found(meta),
            Err(e) => Extraction::Malformed(format!("Failed to parse metadata: {e}")),
        };
    }

    Extraction::Missing
}

/// Cut the JSON object out of the script text.
///
/// The object runs from the end of the `var metadata =` assignment to the
/// closing `};`. Script text after that terminator (further assignments)
/// is discarded.
fn cut_payload(script: &str) -> Option<String> {
    let assignment = Regex::new(r"var\s+metadata\s*=\s*").ok()?;
    let start = assignment.find(script)?.end();
    let rest = script[start..].trim();

    let payload = match rest.find("};") {
        Some(pos) => &rest[..=pos],
        None => rest.trim_end_matches(';').trim_end(),
    };
    Some(payload.to_string())
}
