// src/models/mod.rs

//! Domain models for the harvester application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod metadata;
mod record;

// Re-export all public types
pub use config::{CatalogConfig, Config, HttpConfig, StorageConfig};
pub use metadata::{EmbeddedMetadata, NamedEntity, scalar_display};
pub use record::{MetadataRecord, NO_ERROR, NOT_AVAILABLE, RunSummary, Submission};
