#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use gallery_api::config::{ServerConfig, UploadConfig};
use gallery_api::router::build_app_router;
use gallery_api::state::AppState;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

pub const MIB: usize = 1024 * 1024;

pub const BOUNDARY: &str = "gallery-test-boundary";

/// A router wired to temporary asset and staging directories.
pub struct TestApp {
    pub router: Router,
    pub assets: TempDir,
    pub staging: TempDir,
}

impl TestApp {
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Absolute path of the image storage directory.
    pub fn upload_dir(&self) -> PathBuf {
        self.assets.path().join("assets/uploads")
    }
}

/// Build a test `ServerConfig` with safe defaults and the given directories.
pub fn test_config(assets: &Path, staging: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_request_bytes: 8 * MIB,
        db_max_connections: 5,
        uploads: UploadConfig {
            asset_root: assets.to_path_buf(),
            upload_dir: "assets/uploads".to_string(),
            staging_dir: staging.to_path_buf(),
            max_upload_bytes: 5 * MIB as u64,
            placeholder_image: "art/monaLisa.jpg".to_string(),
        },
    }
}

/// Build the full application router against `pool`, with fresh temp directories.
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with(pool, |_| {})
}

/// Like [`build_test_app`], letting the caller adjust the config first.
pub fn build_test_app_with(pool: PgPool, adjust: impl FnOnce(&mut ServerConfig)) -> TestApp {
    let assets = tempfile::tempdir().unwrap();
    let staging = tempfile::tempdir().unwrap();
    let mut config = test_config(assets.path(), staging.path());
    adjust(&mut config);

    TestApp {
        router: build_app_router(AppState::new(pool, config)),
        assets,
        staging,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// One part of a multipart form.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        bytes: Vec<u8>,
    },
}

/// Encode `parts` as a `multipart/form-data` body, closing boundary included.
pub fn multipart_body(parts: Vec<Part<'_>>) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(&bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Content type matching bodies built by [`multipart_body`].
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

pub async fn post_multipart(app: Router, uri: &str, parts: Vec<Part<'_>>) -> Response<Body> {
    post_raw(app, uri, &multipart_content_type(), multipart_body(parts)).await
}

/// POST `body` as-is with the given content type.
pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Number of entries in `dir`; a missing directory counts as empty.
pub fn count_files(dir: &Path) -> usize {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.count(),
        Err(_) => 0,
    }
}
