//! Persistence for harvest runs.
//!
//! Two concerns live here, both file-backed and both written atomically
//! (temp file, then rename):
//! - the checkpoint: one plain-text value naming the last identifier
//!   whose batch fully completed, read at run start to resume
//! - the export: one timestamped CSV artifact per run

pub mod checkpoint;
pub mod export;

pub use checkpoint::{CheckpointStore, FileCheckpoint};
pub use export::{CsvExporter, RecordExporter};
