//! Hacker News API HTTP client.
//! Read-only access to the top-stories list and individual items.

use reqwest::{Client, Response, StatusCode};
use thiserror::Error;

use super::types::Story;

/// 数据源错误
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: StatusCode },

    #[error("failed to decode {url}: {message}")]
    Decode { url: String, message: String },
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Hacker News API client.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct HnClient {
    client: Client,
    base_url: String,
}

impl HnClient {
    /// Create a client against the given API base, e.g. `https://hacker-news.firebaseio.com/v0`.
    pub fn new(base_url: impl Into<String>) -> SourceResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("hackernews-zh/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, base_url))
    }

    /// Create a client that reuses an existing connection pool.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Identifiers of the current top stories, in ranking order.
    pub async fn top_story_ids(&self) -> SourceResult<Vec<u64>> {
        tracing::debug!(base = %self.base_url, "fetching top story ids");
        self.get_json(&format!("{}/topstories.json", self.base_url))
            .await
    }

    /// Details for a single item. A `null` item (deleted or unknown id) is a decode error.
    pub async fn item(&self, id: u64) -> SourceResult<Story> {
        self.get_json(&format!("{}/item/{}.json", self.base_url, id))
            .await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> SourceResult<T> {
        let response = self.client.get(url).send().await?;
        let response = check_response(response)?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| SourceError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Check response status and convert errors.
fn check_response(response: Response) -> SourceResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(SourceError::Status {
            url: response.url().to_string(),
            status,
        })
    }
}
