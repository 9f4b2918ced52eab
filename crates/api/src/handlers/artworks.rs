//! Handlers for the public `/artworks` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use gallery_core::criteria::FilterParams;
use gallery_core::error::CoreError;
use gallery_core::types::DbId;
use gallery_db::models::artwork::{shape_all, ArtworkView};
use gallery_db::repositories::{ArtworkRepo, CategoryRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Filtered listing plus the heading describing the filter.
#[derive(Debug, Serialize)]
pub struct ArtworkListing {
    pub heading: String,
    pub artworks: Vec<ArtworkView>,
}

#[derive(Debug, Deserialize)]
pub struct FeaturedParams {
    pub limit: Option<i64>,
}

/// GET /api/v1/artworks?category=&artist=&price_min=&price_max=&q=
///
/// Blank or malformed parameters are ignored rather than rejected.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> AppResult<Json<DataResponse<ArtworkListing>>> {
    let criteria = params.into_criteria();

    let category_name = match criteria.category_id {
        Some(id) => CategoryRepo::find_by_id(&state.pool, id)
            .await?
            .map(|c| c.name),
        None => None,
    };

    let rows = ArtworkRepo::list(&state.pool, &criteria).await?;
    tracing::debug!(?criteria, count = rows.len(), "Listed artworks");

    Ok(Json(DataResponse {
        data: ArtworkListing {
            heading: criteria.heading(category_name.as_deref()),
            artworks: shape_all(&rows, state.placeholder_image(), state.image_probe.as_ref()),
        },
    }))
}

/// GET /api/v1/artworks/featured?limit=
pub async fn featured(
    State(state): State<AppState>,
    Query(params): Query<FeaturedParams>,
) -> AppResult<Json<DataResponse<Vec<ArtworkView>>>> {
    let rows = ArtworkRepo::list_featured(&state.pool, params.limit).await?;
    Ok(Json(DataResponse {
        data: shape_all(&rows, state.placeholder_image(), state.image_probe.as_ref()),
    }))
}

/// GET /api/v1/artworks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ArtworkView>>> {
    if id <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Artwork id must be a positive integer".to_string(),
        )));
    }

    let row = ArtworkRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }))?;

    Ok(Json(DataResponse {
        data: row.shape(state.placeholder_image(), state.image_probe.as_ref()),
    }))
}
