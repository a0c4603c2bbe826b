use std::io::Cursor;

use axum::{http::header, http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;

/// A tiny valid PNG.
pub fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([255, 255, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Image host with `/receipt.png`, `/not-an-image`, and 404 everywhere else.
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
        .route("/not-an-image", get(|| async { "<html>nope</html>" }))
        .fallback(|| async { StatusCode::NOT_FOUND });
    serve(router).await
}
