//! Fake data for local development.
//!
//! Seeded accounts all live under [`SEED_EMAIL_DOMAIN`] and share
//! [`SEED_PASSWORD`], so they can be logged into and later removed without
//! touching real data.

pub mod documents;
pub mod models;
pub mod users;

use std::time::Instant;

use docvault_core::hash_password;
use sqlx::PgPool;

pub use models::{SEED_EMAIL_DOMAIN, SEED_PASSWORD, SeedConfig, SeededOwner};

/// Seeds users and then documents owned by them.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "🌱 Seeding {} users and {} documents",
        config.total_users(),
        config.total_documents()
    );

    // bcrypt is slow, so every seeded account shares one hash.
    let password_hash = hash_password(SEED_PASSWORD)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let owners = users::seed_users(db, config.regular_users, config.admins, &password_hash).await?;
    documents::seed_documents(db, &owners, config.documents_per_user).await?;

    println!("\n✅ Seeding finished in {:?}", start_time.elapsed());
    println!("   Seeded accounts log in with password: {SEED_PASSWORD}");
    Ok(())
}

/// Removes every seeded document and account.
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    documents::clear_documents(db).await?;
    users::clear_users(db).await?;

    println!("\n✅ Cleared seeded data in {:?}", start_time.elapsed());
    Ok(())
}
