//! Embedded metadata payload structures.
//!
//! The catalog detail page carries its bibliographic data in an inline
//! `var metadata = {...};` script payload. These types mirror that JSON
//! object; unknown fields are ignored.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::models::record::NOT_AVAILABLE;

/// The JSON object assigned to `var metadata` on a detail page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmbeddedMetadata {
    pub title: Option<String>,

    /// Preformatted author display string, may be empty
    pub byline: Option<String>,

    pub creators: Vec<NamedEntity>,

    pub contributors: Vec<NamedEntity>,

    #[serde(rename = "publishedBy")]
    pub published_by: Vec<String>,

    /// May be a string or a bare number in the payload
    #[serde(rename = "publishedDate")]
    pub published_date: Option<Value>,

    /// Scan count, may be a string or a bare number
    #[serde(rename = "numScans")]
    pub num_scans: Option<Value>,

    /// Canonical catalog identifier
    pub id: Option<String>,

    /// Language labels keyed by language code, e.g. `{"en": "German"}`
    pub languages: Vec<HashMap<String, String>>,
}

/// A creator or contributor entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamedEntity {
    pub name: String,
}

impl EmbeddedMetadata {
    /// Author display string.
    ///
    /// A non-empty byline wins; otherwise creator names joined with ", ",
    /// then contributor names, then "N/A".
    pub fn authors(&self) -> String {
        let byline = self.byline.as_deref().map(str::trim).unwrap_or("");
        if !byline.is_empty() {
            return byline.to_string();
        }
        if !self.creators.is_empty() {
            return join_names(&self.creators);
        }
        if !self.contributors.is_empty() {
            return join_names(&self.contributors);
        }
        NOT_AVAILABLE.to_string()
    }

    /// First publisher entry, or "N/A".
    pub fn publisher(&self) -> String {
        self.published_by
            .first()
            .cloned()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// English-labeled language entry, or "N/A".
    pub fn language(&self) -> String {
        self.languages
            .iter()
            .find_map(|entry| entry.get("en").cloned())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

fn join_names(entities: &[NamedEntity]) -> String {
    entities
        .iter()
        .map(|e| e.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a scalar payload value ("1776" and 1776 both become "1776").
pub fn scalar_display(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(names: &[&str]) -> Vec<NamedEntity> {
        names
            .iter()
            .map(|n| NamedEntity {
                name: n.to_string(),
            })
            .collect()
    }

    #[test]
    fn authors_prefers_byline() {
        let meta = EmbeddedMetadata {
            byline: Some("  Goethe, Johann Wolfgang von  ".to_string()),
            creators: named(&["A"]),
            ..EmbeddedMetadata::default()
        };
        assert_eq!(meta.authors(), "Goethe, Johann Wolfgang von");
    }

    #[test]
    fn empty_byline_falls_back_to_creators() {
        let meta = EmbeddedMetadata {
            byline: Some(String::new()),
            creators: named(&["A", "B"]),
            ..EmbeddedMetadata::default()
        };
        assert_eq!(meta.authors(), "A, B");
    }

    #[test]
    fn contributors_used_when_no_creators() {
        let meta = EmbeddedMetadata {
            contributors: named(&["C"]),
            ..EmbeddedMetadata::default()
        };
        assert_eq!(meta.authors(), "C");
    }

    #[test]
    fn authors_defaults_to_not_available() {
        assert_eq!(EmbeddedMetadata::default().authors(), "N/A");
    }

    #[test]
    fn publisher_takes_first_entry() {
        let meta = EmbeddedMetadata {
            published_by: vec!["Cotta".to_string(), "Other".to_string()],
            ..EmbeddedMetadata::default()
        };
        assert_eq!(meta.publisher(), "Cotta");
        assert_eq!(EmbeddedMetadata::default().publisher(), "N/A");
    }

    #[test]
    fn language_picks_english_label() {
        let meta = EmbeddedMetadata {
            languages: vec![
                HashMap::from([("de".to_string(), "Deutsch".to_string())]),
                HashMap::from([("en".to_string(), "German".to_string())]),
            ],
            ..EmbeddedMetadata::default()
        };
        assert_eq!(meta.language(), "German");

        let no_english = EmbeddedMetadata {
            languages: vec![HashMap::from([("de".to_string(), "Deutsch".to_string())])],
            ..EmbeddedMetadata::default()
        };
        assert_eq!(no_english.language(), "N/A");
    }

    #[test]
    fn scalar_display_handles_strings_and_numbers() {
        assert_eq!(
            scalar_display(Some(&Value::String("1776".to_string()))),
            "1776"
        );
        assert_eq!(scalar_display(Some(&Value::from(342))), "342");
        assert_eq!(scalar_display(None), "N/A");
    }
}
