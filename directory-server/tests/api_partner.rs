mod common;

use std::io::Cursor;

use axum::body::Body;
use common::{BOUNDARY, TestApp, error_code, multipart_body};
use http::{Method, Request, StatusCode, header};
use image::{ImageFormat, RgbImage};

fn png_logo() -> Vec<u8> {
    let img = RgbImage::from_pixel(8, 4, image::Rgb([200, 120, 10]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

fn upload_request(token: &str, field: &str, filename: &str, data: &[u8]) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/partner/logo")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field, filename, data)))
        .unwrap()
}

#[tokio::test]
async fn test_branding_is_public() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/partner", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["logo_url"].is_null());
}

#[tokio::test]
async fn test_admin_uploads_logo() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let (status, body) = app
        .send(upload_request(&token, "file", "logo.png", &png_logo()))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let url = body["logo_url"].as_str().unwrap();
    assert!(url.starts_with("memory://logos/partner/"));
    assert!(url.ends_with(".jpg"));

    let path = url.trim_start_matches("memory://logos/");
    let (bytes, content_type) = app.storage.object(path).unwrap();
    assert_eq!(content_type, "image/jpeg");
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

    let (_, public) = app.get("/api/partner", None).await;
    assert_eq!(public["logo_url"], url);
}

#[tokio::test]
async fn test_logo_upload_rejections() {
    let app = TestApp::new();
    let admin = app.admin_token().await;

    let (status, body) = app
        .send(upload_request(&admin, "other", "logo.png", &png_logo()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 6504);

    let (status, body) = app
        .send(upload_request(&admin, "file", "logo.gif", &png_logo()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 6502);

    let (status, body) = app
        .send(upload_request(&admin, "file", "logo.png", b"not an image"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 6503);

    let searcher = app.searcher_token().await;
    let (status, _) = app
        .send(upload_request(&searcher, "file", "logo.png", &png_logo()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
