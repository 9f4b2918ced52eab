//! Repository for the `artworks` table.
//!
//! Listing goes through [`build_artwork_query`], which turns a
//! [`FilterCriteria`] into one parameterized statement. Criteria values only
//! ever travel as bind parameters; the SQL text is assembled from fixed
//! fragments and `$n` placeholders.

use gallery_core::artwork_form::NewArtwork;
use gallery_core::criteria::{substring_pattern, FilterCriteria};
use gallery_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::artwork::{Artwork, ArtworkRow};

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

/// Column list for plain `artworks` queries.
const COLUMNS: &str = "\
    artwork_id, title, artist_name, description, category_id, \
    price, image_url, is_featured, created_at";

/// Column list for the category-joined read shape.
const JOINED_COLUMNS: &str = "\
    a.artwork_id, a.title, a.artist_name, a.description, a.category_id, \
    c.name AS category_name, a.price, a.image_url, a.is_featured, a.created_at";

const FROM_JOINED: &str = "\
    FROM artworks a \
    LEFT JOIN categories c ON c.category_id = a.category_id";

/// Newest first; id breaks ties between rows created in the same instant.
const NEWEST_FIRST: &str = "ORDER BY a.created_at DESC, a.artwork_id DESC";

/// Default number of featured artworks.
pub const DEFAULT_FEATURED_LIMIT: i64 = 6;

/// Maximum number of featured artworks per request.
pub const MAX_FEATURED_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Filter builder
// ---------------------------------------------------------------------------

/// A value bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    BigInt(i64),
    Text(String),
    Decimal(Decimal),
}

/// A parameterized listing query and its bind values, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkQuery {
    pub sql: String,
    pub binds: Vec<BindValue>,
}

/// Build the listing query for `criteria`. Empty criteria match every artwork.
pub fn build_artwork_query(criteria: &FilterCriteria) -> ArtworkQuery {
    let mut conditions: Vec<String> = Vec::new();
    let mut binds: Vec<BindValue> = Vec::new();
    let mut bind_idx = 1u32;

    if let Some(category_id) = criteria.category_id {
        conditions.push(format!("a.category_id = ${bind_idx}"));
        bind_idx += 1;
        binds.push(BindValue::BigInt(category_id));
    }

    if let Some(ref artist) = criteria.artist {
        conditions.push(format!("a.artist_name = ${bind_idx}"));
        bind_idx += 1;
        binds.push(BindValue::Text(artist.clone()));
    }

    if let Some(min) = criteria.price_min {
        conditions.push(format!("a.price >= ${bind_idx}"));
        bind_idx += 1;
        binds.push(BindValue::Decimal(min));
    }

    if let Some(max) = criteria.price_max {
        conditions.push(format!("a.price <= ${bind_idx}"));
        bind_idx += 1;
        binds.push(BindValue::Decimal(max));
    }

    if let Some(ref term) = criteria.term {
        conditions.push(format!(
            "(a.title ILIKE ${bind_idx} OR a.description ILIKE ${bind_idx})"
        ));
        binds.push(BindValue::Text(substring_pattern(term)));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    ArtworkQuery {
        sql: format!("SELECT {JOINED_COLUMNS} {FROM_JOINED}{where_clause} {NEWEST_FIRST}"),
        binds,
    }
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Decimal(v) => q = q.bind(*v),
        }
    }
    q
}

// ---------------------------------------------------------------------------
// ArtworkRepo
// ---------------------------------------------------------------------------

/// Provides read and insert operations for artworks.
pub struct ArtworkRepo;

impl ArtworkRepo {
    /// List artworks matching `criteria`, newest first.
    pub async fn list(
        pool: &PgPool,
        criteria: &FilterCriteria,
    ) -> Result<Vec<ArtworkRow>, sqlx::Error> {
        let query = build_artwork_query(criteria);
        bind_values(sqlx::query_as::<_, ArtworkRow>(&query.sql), &query.binds)
            .fetch_all(pool)
            .await
    }

    /// Featured artworks, newest first. `limit` is clamped to `1..=MAX_FEATURED_LIMIT`.
    pub async fn list_featured(
        pool: &PgPool,
        limit: Option<i64>,
    ) -> Result<Vec<ArtworkRow>, sqlx::Error> {
        let limit = limit
            .unwrap_or(DEFAULT_FEATURED_LIMIT)
            .clamp(1, MAX_FEATURED_LIMIT);
        let query = format!(
            "SELECT {JOINED_COLUMNS} {FROM_JOINED} \
             WHERE a.is_featured = TRUE \
             {NEWEST_FIRST} \
             LIMIT $1"
        );
        sqlx::query_as::<_, ArtworkRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Find one artwork (with its category name) by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ArtworkRow>, sqlx::Error> {
        let query = format!("SELECT {JOINED_COLUMNS} {FROM_JOINED} WHERE a.artwork_id = $1");
        sqlx::query_as::<_, ArtworkRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a validated artwork. `id` and `created_at` are assigned by the database.
    pub async fn create(
        pool: &PgPool,
        input: &NewArtwork,
        image_url: Option<&str>,
    ) -> Result<Artwork, sqlx::Error> {
        let query = format!(
            "INSERT INTO artworks \
                (title, artist_name, description, category_id, price, image_url, is_featured) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(&input.title)
            .bind(&input.artist_name)
            .bind(input.description.as_deref())
            .bind(input.category_id)
            .bind(input.price)
            .bind(image_url)
            .bind(input.is_featured)
            .fetch_one(pool)
            .await
    }

    /// Total number of artworks.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM artworks")
            .fetch_one(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn all_criteria() -> FilterCriteria {
        FilterCriteria {
            category_id: Some(3),
            artist: Some("Robert'); DROP TABLE artworks;--".into()),
            price_min: Some(Decimal::new(100, 0)),
            price_max: Some(Decimal::new(500, 0)),
            term: Some("50%_night".into()),
        }
    }

    #[test]
    fn empty_criteria_has_no_where_clause() {
        let query = build_artwork_query(&FilterCriteria::default());
        assert!(!query.sql.contains("WHERE"));
        assert!(query.sql.ends_with("ORDER BY a.created_at DESC, a.artwork_id DESC"));
        assert!(query.binds.is_empty());
    }

    #[test]
    fn all_criteria_are_bound_in_order() {
        let query = build_artwork_query(&all_criteria());
        assert!(query.sql.contains(
            "WHERE a.category_id = $1 AND a.artist_name = $2 AND a.price >= $3 \
             AND a.price <= $4 AND (a.title ILIKE $5 OR a.description ILIKE $5)"
        ));
        assert_eq!(
            query.binds,
            vec![
                BindValue::BigInt(3),
                BindValue::Text("Robert'); DROP TABLE artworks;--".into()),
                BindValue::Decimal(Decimal::new(100, 0)),
                BindValue::Decimal(Decimal::new(500, 0)),
                BindValue::Text("%50\\%\\_night%".into()),
            ]
        );
    }

    #[test]
    fn criteria_values_never_appear_in_sql() {
        let query = build_artwork_query(&all_criteria());
        assert!(!query.sql.contains("Robert"));
        assert!(!query.sql.contains("DROP"));
        assert!(!query.sql.contains("night"));
        assert!(!query.sql.contains("100"));
        assert!(!query.sql.contains("500"));
        assert!(!query.sql.contains('\''));
    }

    #[test]
    fn single_predicates_are_numbered_from_one() {
        let by_artist = build_artwork_query(&FilterCriteria {
            artist: Some("Lisa Taylor".into()),
            ..Default::default()
        });
        assert!(by_artist.sql.contains("WHERE a.artist_name = $1 ORDER BY"));
        assert_eq!(by_artist.binds.len(), 1);

        let max_only = build_artwork_query(&FilterCriteria {
            price_max: Some(Decimal::new(800, 0)),
            ..Default::default()
        });
        assert!(max_only.sql.contains("WHERE a.price <= $1 ORDER BY"));
        assert_eq!(max_only.binds, vec![BindValue::Decimal(Decimal::new(800, 0))]);
    }
}
