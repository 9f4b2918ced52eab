//! Handlers for the `/admin` resource.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::multipart::{read_artwork_submission, remove_staged};
use crate::state::AppState;
use crate::writer::{self, WriteError, WriteOutcome};

/// POST /api/v1/admin/artworks
///
/// Accepts the multipart "add artwork" form with an optional `artwork_image`
/// file. Every outcome is `{ success, message }`: 201 on success, 400 for an
/// unreadable form or validation/upload problems, 500 for server-side
/// storage failures.
pub async fn create_artwork(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => return WriteError::Form(rejection.body_text()).into_response(),
    };

    let submission =
        match read_artwork_submission(&mut multipart, &state.config.uploads.staging_dir).await {
            Ok(submission) => submission,
            Err(e) => return e.into_response(),
        };

    let result = writer::create_artwork(
        &state.pool,
        &state.uploads,
        &submission.form,
        submission.image.as_ref(),
    )
    .await;

    // Whatever the outcome, nothing may stay behind in staging.
    if let Some(image) = &submission.image {
        remove_staged(image).await;
    }

    match result {
        Ok(_) => (StatusCode::CREATED, Json(WriteOutcome::created())).into_response(),
        Err(e) => e.into_response(),
    }
}
