//! Metadata record, submission, and run summary structures.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::metadata::{EmbeddedMetadata, scalar_display};

/// Placeholder for absent field values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Error field value of a successful record.
pub const NO_ERROR: &str = "No error";

/// The per-identifier output row.
///
/// Every submitted identifier produces exactly one record, whether the
/// fetch succeeded or not; failures are carried in the `error` field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetadataRecord {
    pub title: String,
    pub authors: String,
    pub publisher: String,
    pub date: String,
    pub extent: String,
    pub canonical_id: String,
    pub language: String,
    pub error: String,
}

impl MetadataRecord {
    /// Record for an identifier whose fetch or parse failed.
    ///
    /// All display fields are "N/A"; the canonical id is kept so the row
    /// stays attributable.
    pub fn failed(id: &str, error: impl Into<String>) -> Self {
        Self {
            title: NOT_AVAILABLE.to_string(),
            authors: NOT_AVAILABLE.to_string(),
            publisher: NOT_AVAILABLE.to_string(),
            date: NOT_AVAILABLE.to_string(),
            extent: NOT_AVAILABLE.to_string(),
            canonical_id: id.to_string(),
            language: NOT_AVAILABLE.to_string(),
            error: error.into(),
        }
    }

    /// Record for a page that carried no embedded metadata block.
    ///
    /// The canonical id is "N/A" here: with no payload there is nothing to
    /// read it from.
    pub fn metadata_missing(id: &str) -> Self {
        Self::failed(NOT_AVAILABLE, format!("Metadata not found for ID: {id}"))
    }

    /// Record built from a parsed embedded metadata payload.
    pub fn from_embedded(meta: &EmbeddedMetadata) -> Self {
        Self {
            title: meta
                .title
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            authors: meta.authors(),
            publisher: meta.publisher(),
            date: scalar_display(meta.published_date.as_ref()),
            extent: scalar_display(meta.num_scans.as_ref()),
            canonical_id: meta.id.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            language: meta.language(),
            error: NO_ERROR.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error == NO_ERROR
    }
}

/// A run request: the identifier list plus batch parameters.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Ordered raw identifiers, one fetch each
    pub ids: Vec<String>,

    /// Identifiers per batch; also the concurrency width
    pub batch_size: usize,

    /// Pause between batches, in minutes
    pub pause_minutes: u64,
}

impl Submission {
    /// Validate submission parameters before a run starts.
    pub fn validate(&self) -> Result<()> {
        if self.ids.is_empty() {
            return Err(AppError::validation("no identifiers submitted"));
        }
        if self.batch_size == 0 {
            return Err(AppError::validation("batch_size must be > 0"));
        }
        Ok(())
    }
}

/// Statistics for a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Identifiers processed this run (after the resume offset)
    pub id_count: usize,

    /// Batches executed this run
    pub batch_count: usize,

    /// Records whose error field is not "No error"
    pub failure_count: usize,

    /// Exported artifact location
    pub export_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_record_keeps_id_and_error() {
        let record = MetadataRecord::failed("00000123", "404 Error: 00000123");
        assert_eq!(record.canonical_id, "00000123");
        assert_eq!(record.error, "404 Error: 00000123");
        assert_eq!(record.title, "N/A");
        assert_eq!(record.language, "N/A");
        assert!(!record.is_success());
    }

    #[test]
    fn metadata_missing_record_has_no_canonical_id() {
        let record = MetadataRecord::metadata_missing("00000123");
        assert_eq!(record.canonical_id, "N/A");
        assert_eq!(record.error, "Metadata not found for ID: 00000123");
    }

    #[test]
    fn from_embedded_is_successful() {
        let meta = EmbeddedMetadata {
            title: Some("Faust".to_string()),
            id: Some("bsb00000001".to_string()),
            ..EmbeddedMetadata::default()
        };
        let record = MetadataRecord::from_embedded(&meta);
        assert_eq!(record.title, "Faust");
        assert_eq!(record.canonical_id, "bsb00000001");
        assert_eq!(record.error, "No error");
        assert!(record.is_success());
    }

    #[test]
    fn submission_validation() {
        let submission = Submission {
            ids: vec!["1".to_string()],
            batch_size: 1,
            pause_minutes: 0,
        };
        assert!(submission.validate().is_ok());

        let empty = Submission {
            ids: Vec::new(),
            batch_size: 1,
            pause_minutes: 0,
        };
        assert!(empty.validate().is_err());

        let zero_batch = Submission {
            ids: vec!["1".to_string()],
            batch_size: 0,
            pause_minutes: 0,
        };
        assert!(zero_batch.validate().is_err());
    }
}
