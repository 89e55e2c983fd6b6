use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::{config::Config, model::Track};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid search url: {0}")]
    Url(#[from] url::ParseError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("search endpoint returned {0}")]
    Status(StatusCode),

    #[error("malformed search response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The single catalog query the app needs. Implemented by [`ApiService`]
/// and by in-memory fakes in tests.
#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn search(&self, term: &str) -> Result<Vec<Track>, ApiError>;
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

pub struct ApiService {
    client: Client,
    search_url: String,
    limit: u32,
}

impl ApiService {
    pub fn new(config: &Config) -> color_eyre::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            search_url: config.search_url.clone(),
            limit: config.result_limit,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn search_url(&self, term: &str) -> Result<Url, ApiError> {
        Ok(Url::parse_with_params(
            &self.search_url,
            &[
                ("term", term),
                ("media", "music"),
                ("limit", &self.limit.to_string()),
            ],
        )?)
    }
}

#[async_trait]
impl SearchApi for ApiService {
    async fn search(&self, term: &str) -> Result<Vec<Track>, ApiError> {
        let url = self.search_url(term)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body = response.text().await?;
        parse_results(&body)
    }
}

/// Parses a search response body. Records that do not carry a `trackId`
/// (collections, artists) are skipped.
pub fn parse_results(body: &str) -> Result<Vec<Track>, ApiError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    let total = response.results.len();

    let tracks: Vec<Track> = response
        .results
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();

    if tracks.len() < total {
        warn!("Skipped {} non-track search results", total - tracks.len());
    }

    Ok(tracks)
}
