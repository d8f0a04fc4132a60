//! Client for the external AI evaluation service.
//!
//! The oracle is an opaque scoring endpoint: it receives a project and
//! returns a full rating vector with narrative justification. Latency is
//! unbounded upstream, so every request carries a client-side timeout.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::types::project::{AiRating, Project};

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("AI evaluation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("AI evaluation returned status {0}: {1}")]
    UpstreamStatus(reqwest::StatusCode, String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

#[async_trait]
pub trait SurvivalOracle: Send + Sync {
    async fn evaluate(&self, project: &Project) -> Result<AiRating, OracleError>;
}

pub struct HttpOracleClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpOracleClient {
    pub fn new(config: &OracleConfig) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl SurvivalOracle for HttpOracleClient {
    async fn evaluate(&self, project: &Project) -> Result<AiRating, OracleError> {
        let url = format!("{}/evaluate", self.base_url);
        let mut request = self.client.post(&url).json(project);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::UpstreamStatus(status, body));
        }

        Ok(response.json().await?)
    }
}
