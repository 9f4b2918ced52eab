//! Artwork models: the stored row, the category-joined read row, and the
//! flattened display record produced from it.

use gallery_core::display::{self, ImageProbe};
use gallery_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `artworks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Artwork {
    pub artwork_id: DbId,
    pub title: String,
    pub artist_name: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub created_at: Timestamp,
}

/// An `artworks` row LEFT JOINed with its category name.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ArtworkRow {
    pub artwork_id: DbId,
    pub title: String,
    pub artist_name: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub category_name: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Display record
// ---------------------------------------------------------------------------

/// Flat, view-ready artwork record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtworkView {
    pub id: DbId,
    pub title: String,
    pub artist_name: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    /// Category name, or `"Uncategorized"`.
    pub category_name: String,
    /// Serialized as a decimal string, e.g. `"1200.00"`.
    pub price: Decimal,
    /// e.g. `"$1,200.00"`.
    pub price_label: String,
    /// Stored image path, or the placeholder when absent or missing on disk.
    pub image_path: String,
    pub is_featured: bool,
    pub created_at: Timestamp,
    /// e.g. `"March 1, 2025"`.
    pub created_label: String,
}

impl ArtworkRow {
    /// Shape this row for display. Deterministic for a given probe answer.
    pub fn shape(&self, placeholder: &str, probe: &dyn ImageProbe) -> ArtworkView {
        ArtworkView {
            id: self.artwork_id,
            title: self.title.clone(),
            artist_name: self.artist_name.clone(),
            description: self.description.clone(),
            category_id: self.category_id,
            category_name: display::category_label(self.category_name.as_deref()),
            price: self.price,
            price_label: display::format_price(self.price),
            image_path: display::resolve_image_path(self.image_url.as_deref(), placeholder, probe),
            is_featured: self.is_featured,
            created_at: self.created_at,
            created_label: display::format_date(self.created_at),
        }
    }
}

/// Shape a batch of rows, preserving order.
pub fn shape_all(rows: &[ArtworkRow], placeholder: &str, probe: &dyn ImageProbe) -> Vec<ArtworkView> {
    rows.iter().map(|row| row.shape(placeholder, probe)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
