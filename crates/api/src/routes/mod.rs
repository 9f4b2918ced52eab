pub mod admin;
pub mod artworks;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /artworks                    filtered listing
/// /artworks/featured           featured artworks
/// /artworks/{id}               artwork detail
/// /categories                  all categories
///
/// /admin/artworks              create artwork (multipart POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/artworks", artworks::router())
        .route("/categories", get(handlers::categories::list))
        .nest("/admin", admin::router())
}
