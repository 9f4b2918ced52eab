use std::sync::Arc;

use gallery_core::display::{FsImageProbe, ImageProbe};
use gallery_core::upload::UploadPolicy;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: gallery_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Validation limits and storage location for artwork images.
    pub uploads: Arc<UploadPolicy>,
    /// Existence check used when shaping image paths for display.
    pub image_probe: Arc<dyn ImageProbe>,
}

impl AppState {
    /// Build state from a pool and config, probing images on the local filesystem.
    pub fn new(pool: gallery_db::DbPool, config: ServerConfig) -> Self {
        let uploads = UploadPolicy::new(
            config.uploads.asset_root.clone(),
            config.uploads.upload_dir.clone(),
            config.uploads.max_upload_bytes,
        );
        let image_probe = FsImageProbe::new(config.uploads.asset_root.clone());

        Self {
            pool,
            config: Arc::new(config),
            uploads: Arc::new(uploads),
            image_probe: Arc::new(image_probe),
        }
    }

    /// Placeholder shown for artworks without a usable image.
    pub fn placeholder_image(&self) -> &str {
        &self.config.uploads.placeholder_image
    }
}
