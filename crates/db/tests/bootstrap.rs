use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema and seed data.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    gallery_db::health_check(&pool).await.unwrap();

    let categories: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(categories.0, 5, "categories should be seeded by migration");

    let artworks: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM artworks")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(artworks.0, 0, "artworks start empty");
}

/// Re-running migrations is a no-op.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_migrations_are_idempotent(pool: PgPool) {
    gallery_db::run_migrations(&pool).await.unwrap();
    gallery_db::run_migrations(&pool).await.unwrap();
}

/// Sample data goes in once and only into an empty table.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sample_seed_is_idempotent(pool: PgPool) {
    let first = gallery_db::seed::seed_sample_artworks(&pool).await.unwrap();
    assert_eq!(first, 6);

    let second = gallery_db::seed::seed_sample_artworks(&pool).await.unwrap();
    assert_eq!(second, 0);

    let count = gallery_db::repositories::ArtworkRepo::count(&pool)
        .await
        .unwrap();
    assert_eq!(count, 6);
}

/// Deleting a category nulls the reference instead of removing artworks.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_category_delete_sets_null(pool: PgPool) {
    gallery_db::seed::seed_sample_artworks(&pool).await.unwrap();

    sqlx::query("DELETE FROM categories WHERE name = 'Paintings'")
        .execute(&pool)
        .await
        .unwrap();

    let orphaned: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM artworks WHERE category_id IS NULL",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(orphaned.0, 2);
}

/// Negative prices are refused by the schema itself.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_price_violates_check(pool: PgPool) {
    let result = sqlx::query(
        "INSERT INTO artworks (title, artist_name, price) VALUES ('t', 'a', -1)",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err());
}
