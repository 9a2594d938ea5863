// src/pipeline/item.rs

//! Per-identifier pipeline: normalize, fetch, extract.
//!
//! Always produces exactly one [`MetadataRecord`]; every failure is folded
//! into the record's error field and never propagates to the caller.

use crate::models::{CatalogConfig, MetadataRecord};
use crate::progress::{ProgressSink, RunEvent};
use crate::services::{DocumentFetcher, Extraction, FetchOutcome, extract_metadata};
use crate::utils::{detail_url, normalize_id};

/// Process one raw identifier into a record.
pub async fn process_item(
    fetcher: &dyn DocumentFetcher,
    progress: &dyn ProgressSink,
    catalog: &CatalogConfig,
    raw_id: &str,
) -> MetadataRecord {
    let id = normalize_id(raw_id, catalog.id_width);
    let url = detail_url(&catalog.base_url, &id);

    progress.emit(RunEvent::log(format!("Processing ID: {id}")));

    match fetcher.fetch(&id, &url).await {
        FetchOutcome::NotFound => {
            progress.emit(RunEvent::log(format!("Error 404: {id} not found.")));
            MetadataRecord::failed(&id, format!("404 Error: {id}"))
        }
        FetchOutcome::Transport(detail) => {
            progress.emit(RunEvent::log(format!("Error processing ID {id}: {detail}")));
            MetadataRecord::failed(&id, detail)
        }
        FetchOutcome::Success(body) => match extract_metadata(&body) {
            Extraction::Found(meta) => MetadataRecord::from_embedded(&meta),
            Extraction::Missing => {
                progress.emit(RunEvent::log(format!("Metadata not found for ID: {id}")));
                MetadataRecord::metadata_missing(&id)
            }
            Extraction::Malformed(detail) => {
                progress.emit(RunEvent::log(format!("Error processing ID {id}: {detail}")));
                MetadataRecord::failed(&id, detail)
            }
        },
    }
}
