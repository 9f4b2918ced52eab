//! The artwork record writer: validate, store the image, insert the row.
//!
//! Every failure is converted into a [`WriteError`] whose `Display` text is
//! the message shown to the admin. Nothing is left behind on failure: no row
//! on validation or upload errors, and no stored image on insert errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gallery_core::artwork_form::{ArtworkForm, ValidationErrors};
use gallery_core::upload::{UploadPolicy, UploadRejection, UploadedFile};
use gallery_db::models::artwork::Artwork;
use gallery_db::repositories::ArtworkRepo;
use gallery_db::DbPool;
use serde::Serialize;

/// Message returned when an artwork was saved.
pub const SUCCESS_MESSAGE: &str = "Artwork added successfully!";

/// PostgreSQL foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Why an artwork could not be written.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The request body could not be read as a multipart form.
    #[error("Invalid form submission: {0}")]
    Form(String),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Upload(#[from] UploadRejection),

    #[error("Database error: unable to save artwork")]
    Storage(#[source] sqlx::Error),
}

impl WriteError {
    pub fn status(&self) -> StatusCode {
        match self {
            WriteError::Upload(UploadRejection::Move(_)) | WriteError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            WriteError::Form(_) | WriteError::Validation(_) | WriteError::Upload(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

/// `{ "success": bool, "message": string }` body of the write endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteOutcome {
    pub success: bool,
    pub message: String,
}

impl WriteOutcome {
    pub fn created() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for WriteError {
    fn into_response(self) -> Response {
        let outcome = WriteOutcome {
            success: false,
            message: self.to_string(),
        };
        (self.status(), Json(outcome)).into_response()
    }
}

/// Validate `form`, store `image` if one was supplied, and insert the artwork.
///
/// An image whose status is `NoFile` counts as not supplied.
pub async fn create_artwork(
    pool: &DbPool,
    uploads: &UploadPolicy,
    form: &ArtworkForm,
    image: Option<&UploadedFile>,
) -> Result<Artwork, WriteError> {
    let input = form.validate().map_err(|errors| {
        tracing::debug!(errors = ?errors.messages(), "Artwork form rejected");
        errors
    })?;

    let stored = match image.filter(|file| file.is_supplied()) {
        Some(file) => match uploads.store(file).await {
            Ok(stored) => Some(stored),
            Err(UploadRejection::Move(e)) => {
                tracing::error!(error = %e, "Failed to store artwork image");
                return Err(UploadRejection::Move(e).into());
            }
            Err(rejection) => {
                tracing::info!(reason = %rejection, "Artwork image rejected");
                return Err(rejection.into());
            }
        },
        None => None,
    };

    let image_url = stored.as_ref().map(|s| s.relative_path.as_str());
    match ArtworkRepo::create(pool, &input, image_url).await {
        Ok(artwork) => {
            tracing::info!(
                artwork_id = artwork.artwork_id,
                stored_path = ?artwork.image_url,
                "Artwork created"
            );
            Ok(artwork)
        }
        Err(e) => {
            if let Some(stored) = &stored {
                uploads.discard(stored).await;
            }
            if is_foreign_key_violation(&e) {
                tracing::info!(category_id = ?input.category_id, "Artwork references unknown category");
                return Err(ValidationErrors(vec!["Category is invalid".to_string()]).into());
            }
            tracing::error!(error = %e, title = %input.title, "Failed to insert artwork");
            Err(WriteError::Storage(e))
        }
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use gallery_core::upload::UploadStatus;

    use super::*;

    #[test]
    fn error_statuses() {
        let validation = WriteError::from(ValidationErrors(vec!["Title is required".into()]));
        assert_matches!(validation, WriteError::Validation(_));
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            validation.to_string(),
            "Please fix the following errors: Title is required"
        );

        let upload = WriteError::from(UploadRejection::Transfer(UploadStatus::CantWrite));
        assert_matches!(upload, WriteError::Upload(UploadRejection::Transfer(_)));
        assert_eq!(upload.status(), StatusCode::BAD_REQUEST);
        assert_eq!(upload.to_string(), "Upload error: Failed to write file to disk");

        let storage = WriteError::Storage(sqlx::Error::PoolTimedOut);
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(storage.to_string(), "Database error: unable to save artwork");
    }

    #[test]
    fn server_side_upload_failures_are_500() {
        let moved = WriteError::from(UploadRejection::Move(std::io::Error::other("disk full")));
        assert_eq!(moved.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(moved.to_string(), "Failed to move uploaded file.");

        let form = WriteError::Form("incomplete stream".into());
        assert_eq!(form.status(), StatusCode::BAD_REQUEST);
        assert_eq!(form.to_string(), "Invalid form submission: incomplete stream");
    }

    #[test]
    fn non_database_errors_are_not_fk_violations() {
        assert!(!is_foreign_key_violation(&sqlx::Error::RowNotFound));
    }
}
