use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::BotometerConfig;
use crate::error::Error;
use crate::model::{ClassificationPayload, ClassificationResult};

const MASHAPE_HEADER: &str = "X-Mashape-Key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The scoring side of a classification: submit a payload, get back the
/// service's verdict. The remote service is an opaque black box.
#[async_trait]
pub trait ScoringService: Send + Sync {
    async fn check_account(
        &self,
        payload: &ClassificationPayload,
    ) -> Result<ClassificationResult, Error>;
}

/// HTTP client for the hosted scoring endpoint.
pub struct HttpScoringClient {
    client: reqwest::Client,
    base_url: String,
    api_version: u32,
    mashape_key: Option<String>,
}

impl HttpScoringClient {
    pub fn new(config: &BotometerConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("botometer-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: config.base_url.clone(),
            api_version: config.api_version,
            mashape_key: config.mashape_key.clone(),
        }
    }

    /// Endpoint path for a service method: `{base}/{version}/{method}`,
    /// tolerant of a trailing slash on the configured base URL.
    pub fn api_path(&self, method: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            method
        )
    }
}

#[async_trait]
impl ScoringService for HttpScoringClient {
    async fn check_account(
        &self,
        payload: &ClassificationPayload,
    ) -> Result<ClassificationResult, Error> {
        let url = self.api_path("check_account");
        debug!(
            url = %url,
            timeline = payload.timeline.len(),
            mentions = payload.mentions.len(),
            "submitting account for scoring"
        );

        let mut request = self.client.post(&url).json(payload);
        if let Some(key) = &self.mashape_key {
            request = request.header(MASHAPE_HEADER, key);
        }

        let response = request.send().await.map_err(Error::Transient)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Service {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::Unexpected(anyhow::Error::new(e).context("decoding scoring response")))
    }
}
