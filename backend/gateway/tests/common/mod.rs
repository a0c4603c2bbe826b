use std::io::Cursor;
use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;
use axum::{Router, http::StatusCode, http::header, routing::get};
use billscan_core::{InlineImage, ModelReply, TokenUsage, VisionModel};
use billscan_gateway::{GatewayState, build_router};
use billscan_understanding::BillExtractor;
use tokio::net::TcpListener;

pub const STUB_MODEL_ID: &str = "stub-1";

/// Model stub returning a fixed reply, or failing when `reply` is `None`.
pub struct StubModel {
    pub reply: Option<String>,
}

#[async_trait]
impl VisionModel for StubModel {
    fn name(&self) -> &str {
        "stub"
    }

    async fn generate(&self, _prompt: &str, _image: &InlineImage) -> Result<ModelReply> {
        match &self.reply {
            Some(text) => Ok(ModelReply {
                text: text.clone(),
                usage: TokenUsage::new(812, 64, Some(876)),
                model: STUB_MODEL_ID.into(),
                latency_ms: 1,
            }),
            None => bail!("stub model unavailable"),
        }
    }
}

pub fn router_with_reply(reply: Option<&str>) -> Router {
    let model = Arc::new(StubModel {
        reply: reply.map(str::to_string),
    });
    let extractor = BillExtractor::new(reqwest::Client::new(), model, 2);
    build_router(GatewayState::new(Arc::new(extractor), STUB_MODEL_ID))
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(8, 8, image::Rgb([240, 240, 240]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("png encoding must succeed");
    out.into_inner()
}

/// Local image host: `/receipt.png` serves a PNG, everything else is 404.
pub async fn image_host() -> String {
    let png = png_bytes();
    let router = Router::new()
        .route(
            "/receipt.png",
            get(move || {
                let png = png.clone();
                async move { ([(header::CONTENT_TYPE, "image/png")], png) }
            }),
        )
        .fallback(|| async { StatusCode::NOT_FOUND });

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port must bind");
    let addr = listener.local_addr().expect("bound listener has an address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("image host must run");
    });
    format!("http://{addr}")
}
