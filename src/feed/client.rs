//! Feed provider HTTP client.

use reqwest::{header, Client, StatusCode};
use url::Url;

use crate::error::{Error, Result};
use crate::feed::types::Post;

/// HTTP client for the feed provider API.
///
/// The pipeline treats the feed as a pure data source: an ordered list of
/// liked posts plus a single-post lookup. Session establishment beyond the
/// bearer token is the operator's concern.
pub struct FeedClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl FeedClient {
    /// Create a new feed client for the given API base URL and bearer token.
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Feed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            token: token.to_string(),
        })
    }

    /// Load the liked posts of the authenticated account, most recent first.
    pub async fn liked_posts(&self, count: u32) -> Result<Vec<Post>> {
        let text = self.get("likes", &[("count", count.to_string())]).await?;

        let posts: Vec<Post> = serde_json::from_str(&text).map_err(|e| {
            Error::Feed(format!(
                "Failed to parse liked posts: {} - Response: {}",
                e,
                &text[..text.len().min(500)]
            ))
        })?;

        tracing::info!("Loaded {} posts", posts.len());
        Ok(posts)
    }

    /// Look up a single post by identifier.
    pub async fn post_by_id(&self, post_id: &str) -> Result<Option<Post>> {
        let text = self.get("posts", &[("ids", post_id.to_string())]).await?;

        let posts: Vec<Post> = serde_json::from_str(&text).map_err(|e| {
            Error::Feed(format!(
                "Failed to parse post lookup: {} - Response: {}",
                e,
                &text[..text.len().min(500)]
            ))
        })?;

        Ok(posts.into_iter().next())
    }

    /// Make an authenticated GET request and return the response body.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String> {
        let url = self.base_url.join(path)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Feed(format!(
                "Authentication with the feed provider failed: HTTP {}",
                status
            )));
        }

        if !status.is_success() {
            return Err(Error::Feed(format!("Feed request failed: HTTP {}", status)));
        }

        Ok(response.text().await?)
    }
}
