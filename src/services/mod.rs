//! Service layer for the harvester application.
//!
//! This module contains the business logic for:
//! - Detail page fetching (`HttpFetcher`)
//! - Embedded metadata extraction (`extract_metadata`)

mod extract;
mod fetch;

pub use extract::{Extraction, extract_metadata};
pub use fetch::{DocumentFetcher, FetchOutcome, HttpFetcher};
