//! HTTP client for a running billscan gateway.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use billscan_core::{BillRequest, FinalResponse};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// Extraction involves a download and a model call; give it room.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

pub const UNREACHABLE_HINT: &str = "Connection failed. Is the server running?";
pub const FAILED_MESSAGE: &str = "Extraction failed: the image could not be downloaded or read";

pub struct GatewayClient {
    client: Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the document URL and return the raw JSON body.
    pub async fn extract_raw(&self, document: &str) -> Result<Value> {
        let url = format!("{}/extract-bill-data", self.base_url);
        debug!(%url, document, "Requesting extraction");
        let resp = self
            .client
            .post(&url)
            .json(&BillRequest { document: document.to_string() })
            .send()
            .await
            .with_context(|| format!("Could not reach {url}"))?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("Server returned {}: {}", status, resp.text().await.unwrap_or_default());
        }
        resp.json().await.context("Server reply is not JSON")
    }

    pub async fn health(&self) -> Result<Value> {
        let url = format!("{}/api/health", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Could not reach {url}"))?;
        resp.json().await.context("Health reply is not JSON")
    }

    /// Run one extraction and classify the result.
    pub async fn request_extraction(&self, document: &str) -> ExtractOutcome {
        let raw = match self.extract_raw(document).await {
            Ok(raw) => raw,
            Err(e) if is_connect_error(&e) => return ExtractOutcome::Unreachable(e),
            Err(e) => return ExtractOutcome::Error(e),
        };

        match serde_json::from_value::<FinalResponse>(raw.clone()) {
            Ok(response) if response.is_success => ExtractOutcome::Extracted { response, raw },
            Ok(_) => ExtractOutcome::Failed { raw },
            Err(e) => ExtractOutcome::Error(
                anyhow::Error::new(e).context("Server reply is not a bill extraction result"),
            ),
        }
    }
}

/// What `billscan extract` observed, before anything is printed.
#[derive(Debug)]
pub enum ExtractOutcome {
    Extracted { response: FinalResponse, raw: Value },
    /// The server answered with `is_success = false`.
    Failed { raw: Value },
    /// No connection to the server could be made.
    Unreachable(anyhow::Error),
    /// Non-2xx status or an unreadable body.
    Error(anyhow::Error),
}

impl ExtractOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Extracted { .. })
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }

    /// User-facing hint printed after the error, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Unreachable(_) => Some(UNREACHABLE_HINT),
            _ => None,
        }
    }
}

fn is_connect_error(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<reqwest::Error>())
        .any(|e| e.is_connect())
}
