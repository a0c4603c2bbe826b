//! The bill extraction pipeline.
//!
//! download -> model call -> fence strip + strict decode -> normalize -> envelope.
//! Any failure aborts the request and yields [`FinalResponse::failure`]; the
//! reason is only logged.

use std::sync::Arc;

use anyhow::{Context, Result};
use billscan_config::Config;
use billscan_core::{normalize_reply, ExtractError, FinalResponse, VisionModel};
use billscan_logging::redact_sensitive_data;
use reqwest::Client;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

use crate::download::download_image;
use crate::prompt::BILL_PROMPT;
use crate::reply::parse_reply;
use crate::vision::GeminiVision;

/// Shared, immutable extraction service. One instance serves every request.
pub struct BillExtractor {
    http: Client,
    model: Arc<dyn VisionModel>,
    /// Bounds model calls in flight; excess requests wait for a slot.
    model_slots: Semaphore,
}

impl BillExtractor {
    pub fn new(http: Client, model: Arc<dyn VisionModel>, max_concurrent_model_calls: usize) -> Self {
        Self {
            http,
            model,
            model_slots: Semaphore::new(max_concurrent_model_calls.max(1)),
        }
    }

    /// Wire the Gemini provider and a download client from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.download_timeout)
            .build()
            .context("Failed to build download HTTP client")?;
        let model = GeminiVision::from_config(config)?;
        Ok(Self::new(http, Arc::new(model), config.max_concurrent_model_calls))
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Run the pipeline for one document URL. Never fails: errors become
    /// the uniform failure envelope.
    pub async fn extract(&self, document_url: &str) -> FinalResponse {
        let span = info_span!("extract", request_id = %Uuid::new_v4());
        async {
            match self.try_extract(document_url).await {
                Ok(response) => response,
                Err(err) => {
                    error!(
                        kind = err.kind(),
                        error = %redact_sensitive_data(&err.to_string()),
                        "Bill extraction failed"
                    );
                    FinalResponse::failure()
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Same pipeline, keeping the tagged error.
    pub async fn try_extract(&self, document_url: &str) -> Result<FinalResponse, ExtractError> {
        info!(url = %document_url, "Extracting bill");

        let image = download_image(&self.http, document_url).await?;
        debug!(bytes = image.data.len(), mime = %image.mime_type, "Image ready");

        let reply = {
            let _slot = self
                .model_slots
                .acquire()
                .await
                .map_err(|_| ExtractError::Model("model call limiter closed".into()))?;
            self.model
                .generate(BILL_PROMPT, &image)
                .await
                .map_err(|e| ExtractError::Model(format!("{} call failed: {e:#}", self.model.name())))?
        };

        let raw = parse_reply(&reply.text)?;
        let bill = normalize_reply(raw)?;

        info!(
            model = %reply.model,
            latency_ms = reply.latency_ms,
            page_type = %bill.page_type,
            items = bill.items.len(),
            input_tokens = reply.usage.input_tokens,
            output_tokens = reply.usage.output_tokens,
            total_tokens = reply.usage.total_tokens,
            "Bill extracted"
        );

        Ok(FinalResponse::single_page(bill.page_type, bill.items, reply.usage))
    }
}
