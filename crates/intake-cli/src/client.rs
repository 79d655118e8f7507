//! HTTP client for the intake API.

use anyhow::{Context, Result};
use intake_core::models::{ImportAcceptedResponse, ImportRecord};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Error body returned by the API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
    code: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create client from `INTAKE_API_URL`, defaulting to a local server.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("INTAKE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload `path` as a new import on behalf of `user_id`.
    pub async fn submit_file(
        &self,
        path: &Path,
        user_id: Option<&str>,
    ) -> Result<ImportAcceptedResponse> {
        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        tracing::debug!(file = %path.display(), size = content.len(), "Uploading file");

        let form = reqwest::multipart::Form::new().part(
            "file",
            reqwest::multipart::Part::bytes(content).file_name(filename),
        );

        let mut request = self.client.post(self.build_url("/imports")).multipart(form);
        if let Some(user_id) = user_id {
            request = request.query(&[("user_id", user_id)]);
        }

        let response = request.send().await.context("Failed to send request")?;
        parse_response(response).await
    }

    /// Fetch an import record by id.
    pub async fn get_import(&self, id: &str) -> Result<ImportRecord> {
        let response = self
            .client
            .get(self.build_url(&format!("/imports/{}", id)))
            .send()
            .await
            .context("Failed to send request")?;
        parse_response(response).await
    }
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(anyhow::anyhow!(
            "API request failed with status {}: {}",
            status,
            describe_error_body(&body)
        ));
    }

    response
        .json::<T>()
        .await
        .context("Failed to parse response")
}

/// Render an API error body as `[CODE] message`, falling back to the raw text.
fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            error,
            code: Some(code),
        }) => format!("[{}] {}", code, error),
        Ok(ApiErrorBody { error, code: None }) => error,
        Err(_) => body.to_string(),
    }
}
