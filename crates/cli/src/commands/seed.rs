//! Seed the catalog with demo categories and products.
//!
//! Idempotent: categories upsert on their unique name and products are
//! only inserted when the catalog is empty, so re-running the command
//! never duplicates rows.

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::CommandError;

const CATEGORIES: &[&str] = &["Electronics", "Books", "Home & Kitchen", "Outdoors"];

/// (name, description, price, category)
const PRODUCTS: &[(&str, &str, &str, &str)] = &[
    (
        "Noise-Cancelling Headphones",
        "Over-ear wireless headphones with 30h battery life",
        "199.99",
        "Electronics",
    ),
    (
        "Mechanical Keyboard",
        "Tenkeyless board with hot-swappable switches",
        "89.50",
        "Electronics",
    ),
    (
        "USB-C Charger 65W",
        "GaN wall charger with two ports",
        "34.99",
        "Electronics",
    ),
    (
        "The Pragmatic Programmer",
        "20th anniversary edition",
        "42.00",
        "Books",
    ),
    (
        "Designing Data-Intensive Applications",
        "The big ideas behind reliable, scalable systems",
        "49.99",
        "Books",
    ),
    (
        "Cast Iron Skillet",
        "Pre-seasoned 12-inch skillet",
        "29.95",
        "Home & Kitchen",
    ),
    (
        "Pour-Over Coffee Set",
        "Glass dripper, carafe and filters",
        "38.00",
        "Home & Kitchen",
    ),
    (
        "Two-Person Tent",
        "Three-season backpacking tent, 2.1 kg",
        "149.00",
        "Outdoors",
    ),
    (
        "Insulated Water Bottle",
        "1L stainless steel, keeps cold 24h",
        "24.50",
        "Outdoors",
    ),
];

/// Seed demo data.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;

    seed_categories(&pool).await?;
    let inserted = seed_products(&pool).await?;

    tracing::info!(products = inserted, "Seed complete!");
    Ok(())
}

async fn seed_categories(pool: &PgPool) -> Result<(), CommandError> {
    for name in CATEGORIES {
        sqlx::query("INSERT INTO category (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;
    }

    tracing::info!(categories = CATEGORIES.len(), "Categories seeded");
    Ok(())
}

async fn seed_products(pool: &PgPool) -> Result<u64, CommandError> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product")
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        tracing::info!(existing, "Products already present, skipping");
        return Ok(0);
    }

    let mut inserted = 0;
    for (name, description, price, category) in PRODUCTS {
        let price: Decimal = price.parse().unwrap_or_default();

        sqlx::query(
            "INSERT INTO product (name, description, price, category_id)
             VALUES ($1, $2, $3, (SELECT id FROM category WHERE name = $4))",
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .execute(pool)
        .await?;

        inserted += 1;
    }

    Ok(inserted)
}
