//! Route definitions for the `/artworks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::artworks;
use crate::state::AppState;

/// Routes mounted at `/artworks`.
///
/// ```text
/// GET    /              -> list
/// GET    /featured      -> featured
/// GET    /{id}          -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(artworks::list))
        .route("/featured", get(artworks::featured))
        .route("/{id}", get(artworks::get_by_id))
}
