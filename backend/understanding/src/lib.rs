//! Bill understanding: fetch the image, ask a vision model about it, and
//! turn the reply into a [`billscan_core::FinalResponse`].

pub mod download;
pub mod extractor;
pub mod prompt;
pub mod reply;
pub mod vision;

#[cfg(test)]
mod test_support;

pub use download::{decode_image, download_image, BROWSER_USER_AGENT};
pub use extractor::BillExtractor;
pub use prompt::BILL_PROMPT;
pub use reply::{parse_reply, strip_code_fences};
pub use vision::GeminiVision;
