//! Category model (static reference data).

use serde::Serialize;
use sqlx::FromRow;
use gallery_core::types::DbId;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub category_id: DbId,
    pub name: String,
    pub description: Option<String>,
}
