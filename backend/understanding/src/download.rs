//! Image download: fetch the bill and make sure the bytes are a real image.
//!
//! Every failure here is reported as [`ExtractError::Download`].

use std::io::Cursor;

use billscan_core::{ExtractError, InlineImage};
use image::ImageFormat;
use reqwest::{header::USER_AGENT, Client};
use tracing::debug;

/// Some image hosts refuse requests without a browser-looking agent.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// GET `url` and decode the body as an image.
pub async fn download_image(client: &Client, url: &str) -> Result<InlineImage, ExtractError> {
    let response = client
        .get(url)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .send()
        .await
        .map_err(|e| ExtractError::Download(format!("request to {url} failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ExtractError::Download(format!("{url} returned {status}")));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ExtractError::Download(format!("reading body of {url} failed: {e}")))?;
    debug!(url, bytes = bytes.len(), "Fetched image body");

    // Decoding is CPU-bound; keep it off the async workers.
    let data = bytes.to_vec();
    tokio::task::spawn_blocking(move || decode_image(data))
        .await
        .map_err(|e| ExtractError::Download(format!("image decode task failed: {e}")))?
}

/// Sniff the image format and fully decode it once to reject corrupt data.
///
/// PNG, JPEG and WEBP bytes are passed through untouched. Any other decodable
/// format (GIF, BMP, TIFF, ...) is re-encoded as PNG, since the model only
/// accepts those three inline.
pub fn decode_image(data: Vec<u8>) -> Result<InlineImage, ExtractError> {
    let format = image::guess_format(&data)
        .map_err(|e| ExtractError::Download(format!("unrecognized image data: {e}")))?;
    let decoded = image::load_from_memory_with_format(&data, format)
        .map_err(|e| ExtractError::Download(format!("image decode failed: {e}")))?;

    if matches!(format, ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP) {
        return Ok(InlineImage {
            mime_type: format.to_mime_type().to_string(),
            data,
        });
    }

    let mut out = Cursor::new(Vec::new());
    decoded
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| ExtractError::Download(format!("re-encoding {format:?} as PNG failed: {e}")))?;
    debug!(?format, "Re-encoded image as PNG");
    Ok(InlineImage {
        mime_type: ImageFormat::Png.to_mime_type().to_string(),
        data: out.into_inner(),
    })
}
