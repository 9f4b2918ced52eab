//! Reading the admin "add artwork" multipart form.
//!
//! Text fields are collected into an [`ArtworkForm`]. The image field is
//! streamed to the staging directory chunk by chunk and described by an
//! [`UploadedFile`] whose status records how the transfer went; transfer
//! problems never fail the request here, they are judged later by the
//! upload policy. Only a body that is not a readable multipart form fails
//! the read, and then nothing stays behind in staging.

use std::path::{Path, PathBuf};

use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::http::StatusCode;
use gallery_core::artwork_form::ArtworkForm;
use gallery_core::upload::{UploadStatus, UploadedFile};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::writer::WriteError;

/// Name of the file field.
pub const IMAGE_FIELD: &str = "artwork_image";

/// Optional client-declared size cap for the image, in bytes.
pub const MAX_FILE_SIZE_FIELD: &str = "max_file_size";

/// Everything submitted with one "add artwork" request.
#[derive(Debug, Default)]
pub struct ArtworkSubmission {
    pub form: ArtworkForm,
    pub image: Option<UploadedFile>,
}

/// Read every field of the form, staging the image under `staging_dir`.
///
/// When the image field is sent more than once, the last one wins.
pub async fn read_artwork_submission(
    multipart: &mut Multipart,
    staging_dir: &Path,
) -> Result<ArtworkSubmission, WriteError> {
    let mut submission = ArtworkSubmission::default();
    let mut declared_max: Option<u64> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) if is_too_large(&e) => {
                mark_oversized(&mut submission.image).await;
                break;
            }
            Err(e) => return Err(malformed(&submission, e).await),
        };

        let name = field.name().unwrap_or("").to_string();
        if name == IMAGE_FIELD {
            if let Some(previous) = submission.image.take() {
                remove_staged(&previous).await;
            }
            let staged = spool_image(field, staging_dir).await;
            let interrupted = matches!(staged.status, UploadStatus::IniSize | UploadStatus::Partial);
            submission.image = Some(staged);
            if interrupted {
                break;
            }
            continue;
        }

        let value = match field.text().await {
            Ok(value) => value,
            Err(e) if is_too_large(&e) => {
                mark_oversized(&mut submission.image).await;
                break;
            }
            Err(e) => return Err(malformed(&submission, e).await),
        };

        let form = &mut submission.form;
        match name.as_str() {
            "title" => form.title = Some(value),
            "artist_name" => form.artist_name = Some(value),
            "description" => form.description = Some(value),
            "category_id" => form.category_id = Some(value),
            "price" => form.price = Some(value),
            "is_featured" => form.is_featured = Some(value),
            MAX_FILE_SIZE_FIELD => declared_max = value.trim().parse().ok(),
            _ => {} // ignore unknown fields
        }
    }

    if let (Some(max), Some(image)) = (declared_max, submission.image.as_mut()) {
        if image.status == UploadStatus::Ok && image.size > max {
            image.status = UploadStatus::FormSize;
            remove_staged(image).await;
        }
    }

    Ok(submission)
}

/// Delete the staged bytes of `image`, if they are still there.
pub async fn remove_staged(image: &UploadedFile) {
    if image.temp_path.as_os_str().is_empty() {
        return;
    }
    if let Err(e) = tokio::fs::remove_file(&image.temp_path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(
                error = %e,
                path = %image.temp_path.display(),
                "Failed to remove staged upload"
            );
        }
    }
}

/// Drop whatever was staged so far and describe the unreadable body.
async fn malformed(submission: &ArtworkSubmission, err: MultipartError) -> WriteError {
    if let Some(image) = &submission.image {
        remove_staged(image).await;
    }
    tracing::info!(error = %err, "Unreadable artwork submission");
    WriteError::Form(err.body_text())
}

fn is_too_large(err: &MultipartError) -> bool {
    err.status() == StatusCode::PAYLOAD_TOO_LARGE
}

/// The request body limit was hit outside the image field.
async fn mark_oversized(image: &mut Option<UploadedFile>) {
    match image {
        Some(file) => {
            if file.status == UploadStatus::Ok {
                remove_staged(file).await;
                file.status = UploadStatus::IniSize;
            }
        }
        None => {
            *image = Some(UploadedFile {
                original_name: String::new(),
                temp_path: PathBuf::new(),
                size: 0,
                status: UploadStatus::IniSize,
            })
        }
    }
}

/// Stream the image field to a fresh file under `staging_dir`.
async fn spool_image(mut field: Field<'_>, staging_dir: &Path) -> UploadedFile {
    let mut staged = UploadedFile {
        original_name: field.file_name().unwrap_or("").to_string(),
        temp_path: PathBuf::new(),
        size: 0,
        status: UploadStatus::Ok,
    };

    // An empty file input still sends the part, with no filename.
    if staged.original_name.is_empty() {
        staged.status = UploadStatus::NoFile;
        return staged;
    }

    if let Err(e) = tokio::fs::create_dir_all(staging_dir).await {
        tracing::error!(error = %e, dir = %staging_dir.display(), "Staging directory unavailable");
        staged.status = UploadStatus::NoTmpDir;
        return staged;
    }

    staged.temp_path = staging_dir.join(format!("upload-{}", Uuid::new_v4()));
    let mut file = match tokio::fs::File::create(&staged.temp_path).await {
        Ok(file) => file,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create staged upload");
            staged.status = UploadStatus::CantWrite;
            return staged;
        }
    };

    loop {
        match field.chunk().await {
            Ok(Some(bytes)) => {
                if let Err(e) = file.write_all(&bytes).await {
                    tracing::error!(error = %e, "Failed to write staged upload");
                    staged.status = UploadStatus::CantWrite;
                    break;
                }
                staged.size += bytes.len() as u64;
            }
            Ok(None) => break,
            Err(e) => {
                staged.status = if is_too_large(&e) {
                    UploadStatus::IniSize
                } else {
                    UploadStatus::Partial
                };
                tracing::warn!(error = %e, status = ?staged.status, "Upload interrupted");
                break;
            }
        }
    }

    if staged.status == UploadStatus::Ok {
        if let Err(e) = file.flush().await {
            tracing::error!(error = %e, "Failed to flush staged upload");
            staged.status = UploadStatus::CantWrite;
        }
    }
    drop(file);

    if staged.status != UploadStatus::Ok {
        remove_staged(&staged).await;
    }
    staged
}
