// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use rand::seq::SliceRandom;

use crate::error::Result;
use crate::models::HttpConfig;

/// Create a configured asynchronous HTTP client.
///
/// No default User-Agent is set; callers attach one per request from the
/// configured pool.
pub fn create_async_client(config: &HttpConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .build()?;
    Ok(client)
}

/// Pick a random User-Agent from the pool.
pub fn random_user_agent(pool: &[String]) -> &str {
    pool.choose(&mut rand::thread_rng())
        .map(String::as_str)
        .unwrap_or("Mozilla/5.0 (compatible; harvester/0.1)")
}
