//! Optional sample data for fresh deployments.
//!
//! Categories are seeded by migration. Sample artworks are only inserted by
//! the explicit setup step, and only into an empty `artworks` table, so
//! running it twice is harmless.

use gallery_core::artwork_form::NewArtwork;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::repositories::{ArtworkRepo, CategoryRepo};

struct SampleArtwork {
    title: &'static str,
    artist_name: &'static str,
    description: &'static str,
    category: &'static str,
    /// Price in cents.
    price_cents: i64,
    image_url: &'static str,
    is_featured: bool,
}

const SAMPLE_ARTWORKS: &[SampleArtwork] = &[
    SampleArtwork {
        title: "Starry Night Reimagined",
        artist_name: "Emily Johnson",
        description: "A modern take on Van Gogh's classic, with vibrant blues and swirling patterns.",
        category: "Paintings",
        price_cents: 120_000,
        image_url: "art/painting1.jpg",
        is_featured: true,
    },
    SampleArtwork {
        title: "Urban Landscape",
        artist_name: "Marcus Chen",
        description: "A photographic series capturing the contrast between nature and urban development.",
        category: "Photography",
        price_cents: 80_000,
        image_url: "art/photo1.jpg",
        is_featured: true,
    },
    SampleArtwork {
        title: "Abstract Emotions",
        artist_name: "Sophia Rodriguez",
        description: "A digital artwork exploring the range of human emotions through color and form.",
        category: "Digital Art",
        price_cents: 65_000,
        image_url: "art/digital2.jpg",
        is_featured: true,
    },
    SampleArtwork {
        title: "Marble Serenity",
        artist_name: "David Kim",
        description: "A sculpture carved from white marble, depicting tranquility and peace.",
        category: "Sculptures",
        price_cents: 250_000,
        image_url: "art/sculpture1.jpg",
        is_featured: false,
    },
    SampleArtwork {
        title: "Spring Meadow",
        artist_name: "Lisa Taylor",
        description: "A vibrant landscape showcasing a colorful spring meadow in full bloom.",
        category: "Paintings",
        price_cents: 95_000,
        image_url: "art/painting2.jpg",
        is_featured: false,
    },
    SampleArtwork {
        title: "Creative Fusion",
        artist_name: "Michael Brown",
        description: "A mixed media piece blending various techniques and materials.",
        category: "Mixed Media",
        price_cents: 110_000,
        image_url: "art/mixed1.jpg",
        is_featured: false,
    },
];

/// Insert the sample artworks if the table is empty. Returns how many were inserted.
pub async fn seed_sample_artworks(pool: &PgPool) -> Result<usize, sqlx::Error> {
    if ArtworkRepo::count(pool).await? > 0 {
        tracing::info!("Artworks already present, skipping sample data");
        return Ok(0);
    }

    for sample in SAMPLE_ARTWORKS {
        let category_id = CategoryRepo::find_by_name(pool, sample.category)
            .await?
            .map(|c| c.category_id);

        let input = NewArtwork {
            title: sample.title.to_string(),
            artist_name: sample.artist_name.to_string(),
            description: Some(sample.description.to_string()),
            category_id,
            price: Decimal::new(sample.price_cents, 2),
            is_featured: sample.is_featured,
        };
        ArtworkRepo::create(pool, &input, Some(sample.image_url)).await?;
    }

    tracing::info!(count = SAMPLE_ARTWORKS.len(), "Inserted sample artworks");
    Ok(SAMPLE_ARTWORKS.len())
}
