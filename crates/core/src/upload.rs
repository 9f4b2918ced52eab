//! Image upload policy for new artworks.
//!
//! An [`UploadedFile`] describes a file the HTTP layer has already spooled to
//! a staging location, together with the transfer status it observed.
//! [`UploadPolicy::store`] either rejects it (writing nothing) or moves it
//! into the storage directory under a fresh unique name.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Extensions accepted for artwork images (compared lowercase).
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Default maximum image size (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Default storage directory, relative to the asset root.
pub const DEFAULT_UPLOAD_DIR: &str = "assets/uploads";

/// Prefix for generated image filenames.
const FILENAME_PREFIX: &str = "artwork_";

const MIB: u64 = 1024 * 1024;

// ---------------------------------------------------------------------------
// Transfer status
// ---------------------------------------------------------------------------

/// Outcome of the transfer itself, as observed by the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    /// The file arrived intact.
    Ok,
    /// Exceeded the server-wide request size limit.
    IniSize,
    /// Exceeded the limit the submitting form declared.
    FormSize,
    /// The transfer was cut off mid-stream.
    Partial,
    /// The file field was empty.
    NoFile,
    /// The staging directory is unavailable.
    NoTmpDir,
    /// Writing to the staging directory failed.
    CantWrite,
    /// A server-side component blocked the upload.
    Extension,
    /// Anything else.
    Unknown,
}

impl UploadStatus {
    /// Human-readable message for this status. Every variant maps to exactly one message.
    pub fn message(self) -> &'static str {
        match self {
            Self::Ok => "The file uploaded successfully",
            Self::IniSize => "The uploaded file exceeds the server's maximum upload size",
            Self::FormSize => "The uploaded file exceeds the maximum size specified by the form",
            Self::Partial => "The uploaded file was only partially uploaded",
            Self::NoFile => "No file was uploaded",
            Self::NoTmpDir => "Missing a temporary folder",
            Self::CantWrite => "Failed to write file to disk",
            Self::Extension => "A server extension stopped the file upload",
            Self::Unknown => "Unknown upload error",
        }
    }
}

// ---------------------------------------------------------------------------
// Descriptor and result
// ---------------------------------------------------------------------------

/// One uploaded file staged on local disk.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename as sent by the client.
    pub original_name: String,
    /// Where the bytes were staged.
    pub temp_path: PathBuf,
    /// Number of bytes received.
    pub size: u64,
    pub status: UploadStatus,
}

impl UploadedFile {
    /// False when the form's file field was left empty.
    pub fn is_supplied(&self) -> bool {
        self.status != UploadStatus::NoFile
    }

    /// Lowercased extension of the original filename, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }
}

/// A successfully stored image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Path relative to the asset root, with `/` separators.
    pub relative_path: String,
    /// Where the file now lives on disk.
    pub absolute_path: PathBuf,
}

/// Why an upload was refused. The `Display` text is the user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum UploadRejection {
    #[error("Upload error: {}", .0.message())]
    Transfer(UploadStatus),

    #[error("Invalid file type. Allowed types: {}", ALLOWED_EXTENSIONS.join(", "))]
    InvalidExtension { extension: Option<String> },

    #[error("File is too large. Maximum size: {}", describe_size(.max_bytes))]
    TooLarge { size: u64, max_bytes: u64 },

    #[error("Failed to move uploaded file.")]
    Move(#[source] std::io::Error),
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Validation limits plus the destination for accepted images.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    asset_root: PathBuf,
    storage_dir: String,
    max_bytes: u64,
}

impl UploadPolicy {
    /// `storage_dir` is relative to `asset_root`; stored paths are reported
    /// relative to `asset_root` so the display probe can find them again.
    pub fn new(asset_root: impl Into<PathBuf>, storage_dir: impl Into<String>, max_bytes: u64) -> Self {
        let storage_dir = storage_dir.into().trim_matches('/').to_string();
        Self {
            asset_root: asset_root.into(),
            storage_dir,
            max_bytes,
        }
    }

    /// Check status, extension and size. Returns the normalized extension.
    pub fn check(&self, file: &UploadedFile) -> Result<String, UploadRejection> {
        if file.status != UploadStatus::Ok {
            return Err(UploadRejection::Transfer(file.status));
        }

        let extension = file.extension();
        let ext = match extension.as_deref() {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext) => ext.to_string(),
            _ => return Err(UploadRejection::InvalidExtension { extension }),
        };

        if file.size > self.max_bytes {
            return Err(UploadRejection::TooLarge {
                size: file.size,
                max_bytes: self.max_bytes,
            });
        }

        Ok(ext)
    }

    /// Validate `file` and move it into the storage directory.
    ///
    /// Nothing is written under the storage directory unless this returns `Ok`.
    pub async fn store(&self, file: &UploadedFile) -> Result<StoredImage, UploadRejection> {
        let ext = self.check(file)?;

        let filename = unique_filename(&ext);
        let target_dir = self.asset_root.join(&self.storage_dir);
        tokio::fs::create_dir_all(&target_dir)
            .await
            .map_err(UploadRejection::Move)?;

        let absolute_path = target_dir.join(&filename);
        move_file(&file.temp_path, &absolute_path)
            .await
            .map_err(UploadRejection::Move)?;

        let relative_path = if self.storage_dir.is_empty() {
            filename
        } else {
            format!("{}/{filename}", self.storage_dir)
        };

        tracing::info!(
            stored_path = %relative_path,
            size = file.size,
            "Stored uploaded image"
        );

        Ok(StoredImage {
            relative_path,
            absolute_path,
        })
    }

    /// Remove an image stored by [`store`](Self::store). Missing files are ignored.
    pub async fn discard(&self, image: &StoredImage) {
        if let Err(e) = tokio::fs::remove_file(&image.absolute_path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    error = %e,
                    path = %image.absolute_path.display(),
                    "Failed to remove stored image"
                );
            }
        }
    }
}

/// Collision-resistant filename: time-ordered UUIDv7 plus the original extension.
pub fn unique_filename(ext: &str) -> String {
    format!("{FILENAME_PREFIX}{}.{ext}", Uuid::now_v7().simple())
}

/// Rename, falling back to copy + remove when source and target sit on
/// different filesystems.
async fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    if tokio::fs::rename(from, to).await.is_ok() {
        return Ok(());
    }

    if let Err(e) = tokio::fs::copy(from, to).await {
        let _ = tokio::fs::remove_file(to).await;
        return Err(e);
    }
    tokio::fs::remove_file(from).await
}

fn describe_size(bytes: &u64) -> String {
    if bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
