use std::path::PathBuf;

use gallery_core::display::DEFAULT_PLACEHOLDER_IMAGE;
use gallery_core::upload::{DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_UPLOAD_DIR};

/// Default ceiling on a whole request body (8 MiB).
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 8 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Largest accepted request body, multipart uploads included.
    pub max_request_bytes: usize,
    /// Connection pool size (default: `20`).
    pub db_max_connections: u32,
    /// Image upload and display settings.
    pub uploads: UploadConfig,
}

/// Where images are staged, stored and looked up.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory stored image paths are relative to.
    pub asset_root: PathBuf,
    /// Storage directory for accepted images, relative to `asset_root`.
    pub upload_dir: String,
    /// Staging directory for in-flight uploads.
    pub staging_dir: PathBuf,
    /// Per-image size limit.
    pub max_upload_bytes: u64,
    /// Image shown when an artwork has none.
    pub placeholder_image: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `MAX_REQUEST_BYTES`    | `8388608`                  |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    ///
    /// Upload settings are read by [`UploadConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_request_bytes: usize = std::env::var("MAX_REQUEST_BYTES")
            .map(|v| v.parse().expect("MAX_REQUEST_BYTES must be a valid usize"))
            .unwrap_or(DEFAULT_MAX_REQUEST_BYTES);

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .map(|v| v.parse().expect("DB_MAX_CONNECTIONS must be a valid u32"))
            .unwrap_or(gallery_db::DEFAULT_MAX_CONNECTIONS);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_request_bytes,
            db_max_connections,
            uploads: UploadConfig::from_env(),
        }
    }
}

impl UploadConfig {
    /// | Env Var             | Default                         |
    /// |---------------------|---------------------------------|
    /// | `ASSET_ROOT`        | `.`                             |
    /// | `UPLOAD_DIR`        | `assets/uploads`                |
    /// | `UPLOAD_TMP_DIR`    | `<system temp>/gallery-uploads` |
    /// | `MAX_UPLOAD_BYTES`  | `5242880`                       |
    /// | `PLACEHOLDER_IMAGE` | `art/monaLisa.jpg`              |
    pub fn from_env() -> Self {
        let asset_root = std::env::var("ASSET_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let upload_dir =
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.into());

        let staging_dir = std::env::var("UPLOAD_TMP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir().join("gallery-uploads"));

        let max_upload_bytes: u64 = std::env::var("MAX_UPLOAD_BYTES")
            .map(|v| v.parse().expect("MAX_UPLOAD_BYTES must be a valid u64"))
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        let placeholder_image = std::env::var("PLACEHOLDER_IMAGE")
            .unwrap_or_else(|_| DEFAULT_PLACEHOLDER_IMAGE.into());

        Self {
            asset_root,
            upload_dir,
            staging_dir,
            max_upload_bytes,
            placeholder_image,
        }
    }
}
