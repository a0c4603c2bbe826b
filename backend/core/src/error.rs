use thiserror::Error;

/// Failure of a single bill extraction.
///
/// Both variants collapse to the same failure envelope at the service
/// boundary; the tag only survives in logs.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Network failure, non-2xx status, or bytes that are not an image.
    #[error("download error: {0}")]
    Download(String),

    /// Model API failure or a reply that does not decode into the bill schema.
    #[error("model error: {0}")]
    Model(String),
}

impl ExtractError {
    /// Short tag used as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Download(_) => "download",
            Self::Model(_) => "model",
        }
    }
}
