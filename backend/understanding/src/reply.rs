//! Decoding of the model's text reply.
//!
//! Models like to wrap JSON in markdown fences even when told not to. The
//! fences are removed, then the text must decode into [`RawBillReply`] or the
//! extraction fails.

use billscan_core::{ExtractError, RawBillReply};

/// Remove every "```json" / "```" marker and surrounding whitespace.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

pub fn parse_reply(text: &str) -> Result<RawBillReply, ExtractError> {
    let cleaned = strip_code_fences(text);
    if cleaned.is_empty() {
        return Err(ExtractError::Model("model returned an empty reply".into()));
    }
    serde_json::from_str(&cleaned)
        .map_err(|e| ExtractError::Model(format!("reply is not valid bill JSON: {e}")))
}
