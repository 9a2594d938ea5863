// src/services/fetch.rs

//! Detail page fetcher.
//!
//! One HTTP request per identifier, a randomly rotated client identity,
//! and zero retries; retry policy, if any ever exists, belongs to a caller.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};

use crate::error::Result;
use crate::models::HttpConfig;
use crate::utils::http::{create_async_client, random_user_agent};

/// Classified result of one detail page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Raw response body of a successful request
    Success(String),

    /// Remote reports the identifier does not exist
    NotFound,

    /// Network, timeout, or protocol failure
    Transport(String),
}

/// Capability to fetch one detail page per identifier.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, id: &str, url: &str) -> FetchOutcome;
}

/// HTTP-backed fetcher over a shared reqwest client.
pub struct HttpFetcher {
    client: Client,
    user_agents: Vec<String>,
}

impl HttpFetcher {
    /// Create a new fetcher with the given HTTP configuration.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
            user_agents: config.user_agents.clone(),
        })
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, id: &str, url: &str) -> FetchOutcome {
        log::debug!("GET {} ({})", url, id);

        let response = match self
            .client
            .get(url)
            .header(header::USER_AGENT, random_user_agent(&self.user_agents))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Transport(e.to_string()),
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return FetchOutcome::NotFound;
        }
        if !status.is_success() {
            return FetchOutcome::Transport(format!("HTTP status {status} for ID {id}"));
        }

        match response.text().await {
            Ok(body) => {
                log::debug!("Fetched {} bytes for ID {}", body.len(), id);
                FetchOutcome::Success(body)
            }
            Err(e) => FetchOutcome::Transport(e.to_string()),
        }
    }
}
