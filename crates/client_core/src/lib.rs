use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::{ApiErrorDetail, RequestFailed},
    protocol::{HealthResponse, RecommendRequest, RecommendResponse},
};
use tracing::debug;

pub mod config;
pub mod presenter;
pub mod search;

pub use config::{load_settings, normalize_base_url, ClientSettings};
pub use presenter::{present, PrescriptionCard};
pub use search::{PendingSearch, SearchOutcome, SearchShell, SearchTicket, SearchView};

/// Shown whenever a recommendation request fails, whatever the cause.
pub const APOLOGY_MESSAGE: &str = "Sorry, we couldn't fetch a recommendation right now.";

#[async_trait]
pub trait RecommendationApi: Send + Sync {
    async fn recommend(
        &self,
        query: &str,
    ) -> std::result::Result<RecommendResponse, RequestFailed>;
    async fn health(&self) -> std::result::Result<HealthResponse, RequestFailed>;
}

/// HTTP client for the recommendation backend.
#[derive(Debug, Clone)]
pub struct RecommendClient {
    http: Client,
    base_url: String,
}

impl RecommendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: trim_base_url(base_url.into()),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build recommendation http client")?;
        Ok(Self {
            http,
            base_url: trim_base_url(settings.base_url.clone()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn trim_base_url(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}

async fn read_failure(response: reqwest::Response) -> RequestFailed {
    let status = response.status().as_u16();
    let detail = response
        .json::<ApiErrorDetail>()
        .await
        .ok()
        .and_then(|body| body.describe());
    RequestFailed::status(status, detail)
}

#[async_trait]
impl RecommendationApi for RecommendClient {
    async fn recommend(
        &self,
        query: &str,
    ) -> std::result::Result<RecommendResponse, RequestFailed> {
        let url = format!("{}/recommend", self.base_url);
        debug!(%url, "requesting recommendation");
        let res = self
            .http
            .post(url)
            .json(&RecommendRequest {
                query: query.to_string(),
            })
            .send()
            .await
            .map_err(|err| RequestFailed::transport(err.to_string()))?;
        if !res.status().is_success() {
            return Err(read_failure(res).await);
        }
        res.json::<RecommendResponse>()
            .await
            .map_err(|err| RequestFailed::decode(err.to_string()))
    }

    async fn health(&self) -> std::result::Result<HealthResponse, RequestFailed> {
        let res = self
            .http
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .map_err(|err| RequestFailed::transport(err.to_string()))?;
        if !res.status().is_success() {
            return Err(read_failure(res).await);
        }
        res.json::<HealthResponse>()
            .await
            .map_err(|err| RequestFailed::decode(err.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
