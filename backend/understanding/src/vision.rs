/// Vision understanding: ask Gemini to read a bill image.
///
/// Uses the `generateContent` REST endpoint with the image inlined as base64.
use std::time::Instant;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use billscan_config::Config;
use billscan_core::{InlineImage, ModelReply, TokenUsage, VisionModel};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini `generateContent` client.
pub struct GeminiVision {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiVision {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: Some(api_key.into()),
            model: model.into(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    /// Build from runtime config, applying the model-call timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.model_timeout)
            .build()
            .context("Failed to build Gemini HTTP client")?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.gemini_base_url.clone(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
    total_token_count: Option<u64>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    fn usage(&self) -> TokenUsage {
        let meta = self.usage_metadata.as_ref();
        TokenUsage::new(
            meta.map_or(0, |m| m.prompt_token_count),
            meta.map_or(0, |m| m.candidates_token_count),
            meta.and_then(|m| m.total_token_count),
        )
    }
}

#[async_trait]
impl VisionModel for GeminiVision {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str, image: &InlineImage) -> Result<ModelReply> {
        let Some(api_key) = self.api_key.as_deref() else {
            bail!("no Gemini API key configured (set GEMINI_API_KEY or OPENAI_API_KEY)");
        };
        let start = Instant::now();

        let b64 = STANDARD.encode(&image.data);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: prompt },
                    Part::Inline {
                        inline_data: InlineData {
                            mime_type: &image.mime_type,
                            data: b64,
                        },
                    },
                ],
            }],
        };

        info!(model = %self.model, mime = %image.mime_type, "[Vision] Reading bill via Gemini");

        let resp = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| e.without_url())
            .context("Gemini HTTP request failed")?;

        let status = resp.status();
        if !status.is_success() {
            bail!(
                "Gemini returned {}: {}",
                status,
                resp.text().await.unwrap_or_default()
            );
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| e.without_url())
            .context("Failed to parse Gemini response")?;

        let latency_ms = start.elapsed().as_millis() as u64;
        let usage = parsed.usage();
        debug!(?usage, latency_ms, "Gemini call complete");

        Ok(ModelReply {
            text: parsed.text(),
            usage,
            model: self.model.clone(),
            latency_ms,
        })
    }
}
