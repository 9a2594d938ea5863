// src/pipeline/batch.rs

//! Batch scheduler for a harvest run.
//!
//! Drives the full identifier list through the item pipeline in serial
//! batches: resume offset from the checkpoint, concurrent fetches within a
//! batch, a checkpoint write after every batch, and a pause before the
//! next one. Item failures never abort the run; only submission,
//! checkpoint, and export failures surface as errors.

use std::time::Duration;

use chrono::Utc;
use futures::future;
use tokio::time::sleep;

use crate::error::Result;
use crate::models::{Config, MetadataRecord, RunSummary, Submission};
use crate::pipeline::item::process_item;
use crate::progress::{ProgressSink, RunEvent};
use crate::services::DocumentFetcher;
use crate::storage::{CheckpointStore, RecordExporter};

/// Run one harvest: all batches, the export, and the terminal event.
///
/// Reads the checkpoint once at the start; a restarted process therefore
/// continues after the last fully-completed batch. Callers wanting a fresh
/// run clear the checkpoint before invoking this.
pub async fn run_harvest(
    submission: &Submission,
    config: &Config,
    fetcher: &dyn DocumentFetcher,
    checkpoint: &dyn CheckpointStore,
    exporter: &dyn RecordExporter,
    progress: &dyn ProgressSink,
) -> Result<RunSummary> {
    submission.validate()?;
    let started_at = Utc::now();

    progress.emit(RunEvent::log(format!(
        "Scraping started with {} IDs, batch size: {}, pause time: {} minutes.",
        submission.ids.len(),
        submission.batch_size,
        submission.pause_minutes
    )));

    let offset = resume_offset(&submission.ids, checkpoint).await?;
    if offset > 0 {
        log::info!("Resuming after checkpoint, skipping {} identifiers", offset);
    }

    let remaining = &submission.ids[offset..];
    let batch_count = remaining.len().div_ceil(submission.batch_size);
    let mut records: Vec<MetadataRecord> = Vec::with_capacity(remaining.len());

    for (index, batch) in remaining.chunks(submission.batch_size).enumerate() {
        // The batch is a join barrier: every item completes, in any order,
        // before the checkpoint advances.
        let results = future::join_all(
            batch
                .iter()
                .map(|raw_id| process_item(fetcher, progress, &config.catalog, raw_id)),
        )
        .await;
        records.extend(results);

        if let Some(last_id) = batch.last() {
            checkpoint.write(Some(last_id.as_str())).await?;
        }

        if index + 1 < batch_count {
            progress.emit(RunEvent::log(format!(
                "Batch completed. Waiting for {} minutes before next batch.",
                submission.pause_minutes
            )));
            sleep(Duration::from_secs(submission.pause_minutes * 60)).await;
        } else {
            progress.emit(RunEvent::log("Batch completed."));
        }
    }

    let export_path = exporter.export(&records).await?;
    progress.emit(RunEvent::log(format!(
        "Data saved to {}.",
        export_path.display()
    )));
    progress.emit(RunEvent::ExportReady(export_path.clone()));

    let failure_count = records.iter().filter(|r| !r.is_success()).count();
    Ok(RunSummary {
        started_at,
        finished_at: Utc::now(),
        id_count: remaining.len(),
        batch_count,
        failure_count,
        export_path,
    })
}

/// Position in the identifier list to resume from.
///
/// The checkpoint names the last identifier of a completed batch, so the
/// run continues at the position after it. A checkpoint that no longer
/// appears in the list restarts from the beginning; that fallback silently
/// reprocesses everything, so it is logged loudly.
async fn resume_offset(ids: &[String], checkpoint: &dyn CheckpointStore) -> Result<usize> {
    match checkpoint.read().await? {
        None => Ok(0),
        Some(last) => match ids.iter().position(|id| *id == last) {
            Some(position) => Ok(position + 1),
            None => {
                log::warn!(
                    "Checkpoint '{}' not found in the identifier list; restarting from the beginning",
                    last
                );
                Ok(0)
            }
        },
    }
}
