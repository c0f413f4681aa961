use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use thiserror::Error;

/// What went wrong while fetching a profile. Callers decide per variant:
/// the sync job skips `Http`/`Network` records, the add-user page shows a
/// message for each case.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile request failed with status {0}")]
    Http(reqwest::StatusCode),

    #[error("could not reach the Graph API: {0}")]
    Network(String),

    #[error("response body was not valid JSON: {0}")]
    Decode(String),

    #[error("response decoded to a non-object JSON value")]
    UnexpectedShape,
}

/// Seam between the jobs/endpoints and the actual Graph API.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch one profile and decode it as a flat JSON object.
    async fn fetch_profile(&self, username: &str) -> Result<Map<String, Value>, ProfileError>;
}

#[derive(Clone)]
pub struct GraphClient {
    client: Client,
    base_url: String,
}

impl GraphClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_shared_client(Client::new(), base_url)
    }

    #[must_use]
    pub fn with_shared_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn profile_url(&self, username: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(username))
    }
}

#[async_trait]
impl ProfileSource for GraphClient {
    async fn fetch_profile(&self, username: &str) -> Result<Map<String, Value>, ProfileError> {
        let response = self
            .client
            .get(self.profile_url(username))
            .send()
            .await
            .map_err(|e| ProfileError::Network(e.to_string()))?;

        // Any non-2xx is a hard failure for this one record.
        if !response.status().is_success() {
            return Err(ProfileError::Http(response.status()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProfileError::Network(e.to_string()))?;

        let value: Value =
            serde_json::from_str(&body).map_err(|e| ProfileError::Decode(e.to_string()))?;

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(ProfileError::UnexpectedShape),
        }
    }
}
