//! Route definitions for the `/admin` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /artworks      -> create_artwork
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/artworks", post(admin::create_artwork))
}
