use anyhow::Result;
use async_trait::async_trait;

use crate::types::TokenUsage;

/// An image carried inline in a model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// e.g. `image/png`
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Raw text reply plus accounting from one model call.
#[derive(Debug, Clone)]
pub struct ModelReply {
    pub text: String,
    pub usage: TokenUsage,
    pub model: String,
    pub latency_ms: u64,
}

/// Trait for multimodal models that can read a bill image.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send the instruction and image, returning the model's text reply.
    async fn generate(&self, prompt: &str, image: &InlineImage) -> Result<ModelReply>;
}
