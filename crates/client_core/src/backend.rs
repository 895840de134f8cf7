use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::CatalogOption,
    protocol::{LabelsResponse, ModelsResponse, RecommendRequest, RecommendResponse},
};

/// Operations the recommendation service exposes to this client.
#[async_trait]
pub trait RecommendationBackend: Send + Sync {
    async fn list_labels(&self) -> Result<Vec<String>>;
    async fn list_models(&self) -> Result<Vec<CatalogOption>>;
    async fn recommend(&self, request: &RecommendRequest) -> Result<Vec<String>>;
}

#[derive(Clone)]
pub struct HttpBackend {
    http: Client,
    api_url: String,
}

impl HttpBackend {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    pub fn with_timeout(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self::with_client(http, api_url))
    }

    pub fn with_client(http: Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { http, api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl RecommendationBackend for HttpBackend {
    async fn list_labels(&self) -> Result<Vec<String>> {
        let response: LabelsResponse = self
            .http
            .get(format!("{}/labels", self.api_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("malformed labels payload")?;
        Ok(response.labels)
    }

    async fn list_models(&self) -> Result<Vec<CatalogOption>> {
        let response: ModelsResponse = self
            .http
            .get(format!("{}/models", self.api_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("malformed models payload")?;
        Ok(response.models)
    }

    async fn recommend(&self, request: &RecommendRequest) -> Result<Vec<String>> {
        let response: RecommendResponse = self
            .http
            .post(format!("{}/recommend", self.api_url))
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("malformed recommendations payload")?;
        Ok(response.recommendations)
    }
}

#[cfg(test)]
#[path = "tests/backend_tests.rs"]
mod tests;
