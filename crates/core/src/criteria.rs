//! Artwork filter criteria for the gallery read path.
//!
//! Query-string input arrives as loose strings. [`FilterParams::into_criteria`]
//! normalizes it into a typed [`FilterCriteria`], dropping anything blank or
//! unparseable instead of failing the request: a bad `category` behaves like
//! no category filter at all.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::DbId;

/// Heading used when no filter narrows the listing.
pub const ALL_ARTWORKS_HEADING: &str = "All Artworks";

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/v1/artworks`, exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub category: Option<String>,
    pub artist: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    /// Free-text term matched against title and description.
    pub q: Option<String>,
}

impl FilterParams {
    /// Normalize raw parameters into criteria, ignoring blank or malformed values.
    pub fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            category_id: self.category.as_deref().and_then(parse_category_id),
            artist: non_blank(self.artist),
            price_min: self.price_min.as_deref().and_then(parse_price_bound),
            price_max: self.price_max.as_deref().and_then(parse_price_bound),
            term: non_blank(self.q),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalized criteria
// ---------------------------------------------------------------------------

/// Transient read-path constraints. Every field is optional; an empty
/// criteria set matches all artworks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Exact match on `artworks.category_id`.
    pub category_id: Option<DbId>,
    /// Exact match on `artworks.artist_name`.
    pub artist: Option<String>,
    /// Inclusive lower price bound.
    pub price_min: Option<Decimal>,
    /// Inclusive upper price bound.
    pub price_max: Option<Decimal>,
    /// Case-insensitive substring over title or description.
    pub term: Option<String>,
}

impl FilterCriteria {
    /// Listing heading for the category/artist part of the criteria.
    ///
    /// `category_name` is the resolved name of `category_id`, or `None` when
    /// the id is unset or unknown.
    pub fn heading(&self, category_name: Option<&str>) -> String {
        let category = self.category_id.and(category_name);
        match (self.artist.as_deref(), category) {
            (Some(artist), Some(category)) => format!("Artwork by {artist} in {category}"),
            (Some(artist), None) => format!("Artwork by {artist}"),
            (None, Some(category)) => category.to_string(),
            (None, None) => ALL_ARTWORKS_HEADING.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Escape `LIKE`/`ILIKE` metacharacters so the term matches literally.
///
/// PostgreSQL's default escape character for `LIKE` is the backslash.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Build the `%term%` pattern bound for free-text search.
pub fn substring_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_category_id(raw: &str) -> Option<DbId> {
    raw.trim().parse::<DbId>().ok().filter(|id| *id > 0)
}

fn parse_price_bound(raw: &str) -> Option<Decimal> {
    raw.trim().parse::<Decimal>().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
