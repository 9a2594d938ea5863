//! CSV export of a run's record collection.
//!
//! One artifact per run, named with the run timestamp, one row per
//! identifier. The file goes through the same write-to-temp-then-rename
//! path as the checkpoint so a crashed export never leaves a truncated
//! artifact behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Local;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::{MetadataRecord, StorageConfig};

/// Column headers of the exported artifact.
const HEADERS: [&str; 8] = [
    "Title",
    "Authors",
    "Publisher",
    "Date",
    "Extent (Number of Pages)",
    "BSB ID",
    "Language",
    "Error",
];

/// Capability to turn a run's record collection into a durable artifact.
#[async_trait]
pub trait RecordExporter: Send + Sync {
    /// Write the collection and return the artifact path.
    async fn export(&self, records: &[MetadataRecord]) -> Result<PathBuf>;
}

/// Exporter producing a timestamped CSV file per run.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    export_dir: PathBuf,
    prefix: String,
}

impl CsvExporter {
    /// Create an exporter from the storage configuration.
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            export_dir: config.export_dir.clone(),
            prefix: config.export_prefix.clone(),
        }
    }

    fn render(records: &[MetadataRecord]) -> String {
        let mut out = String::new();
        out.push_str(&HEADERS.map(escape_field).join(","));
        out.push('\n');

        for record in records {
            let row = [
                record.title.as_str(),
                record.authors.as_str(),
                record.publisher.as_str(),
                record.date.as_str(),
                record.extent.as_str(),
                record.canonical_id.as_str(),
                record.language.as_str(),
                record.error.as_str(),
            ];
            out.push_str(&row.map(escape_field).join(","));
            out.push('\n');
        }
        out
    }

    async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordExporter for CsvExporter {
    async fn export(&self, records: &[MetadataRecord]) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.export_dir).await?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = self
            .export_dir
            .join(format!("{}_{}.csv", self.prefix, timestamp));

        Self::write_atomic(&path, Self::render(records).as_bytes()).await?;
        log::info!("Exported {} records to {}", records.len(), path.display());
        Ok(path)
    }
}

/// Quote a field when it carries a separator, quote, or line break.
fn escape_field(field: &str) -> String {
    if field.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
