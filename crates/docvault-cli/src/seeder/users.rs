//! User seeding functionality.
//!
//! Provides functions for generating and inserting fake accounts into the
//! database.

use docvault_models::{RoleId, UserId, system_roles};
use fake::Fake;
use fake::faker::name::en::*;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::{SEED_EMAIL_DOMAIN, SeededOwner, UserSeed};

/// Generates `admins` admin accounts followed by `regular` regular accounts.
pub fn generate_users(regular: usize, admins: usize, password_hash: &str) -> Vec<UserSeed> {
    (0..admins + regular)
        .into_par_iter()
        .map(|idx| {
            let (role_id, prefix) = if idx < admins {
                (system_roles::ADMIN, "admin")
            } else {
                (system_roles::REGULAR, "user")
            };
            generate_user(role_id, prefix, idx, password_hash)
        })
        .collect()
}

fn email_part(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase()
}

fn generate_user(role_id: RoleId, prefix: &str, idx: usize, password_hash: &str) -> UserSeed {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();

    // The index keeps emails unique even when names repeat.
    let email = format!(
        "{}.{}+{}{}@{}",
        email_part(&first_name),
        email_part(&last_name),
        prefix,
        idx,
        SEED_EMAIL_DOMAIN
    );

    UserSeed {
        first_name,
        last_name,
        email,
        password_hash: password_hash.to_string(),
        role_id,
    }
}

/// Seeds fake accounts into the database
pub async fn seed_users(
    db: &PgPool,
    regular: usize,
    admins: usize,
    password_hash: &str,
) -> Result<Vec<SeededOwner>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "👥 Seeding {} users ({} admins, {} regular)...",
        regular + admins,
        admins,
        regular
    );

    let users = generate_users(regular, admins, password_hash);
    let owners = insert_users_batch(db, &users).await?;

    println!(
        "   ✓ Inserted {} users in {:?}",
        owners.len(),
        start_time.elapsed()
    );

    Ok(owners)
}

/// Inserts users in batches inside one transaction
pub async fn insert_users_batch(
    db: &PgPool,
    users: &[UserSeed],
) -> Result<Vec<SeededOwner>, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    // 5 params per user
    const BATCH_SIZE: usize = 1000;

    let mut owners = Vec::with_capacity(users.len());
    for chunk in users.chunks(BATCH_SIZE) {
        owners.extend(insert_users_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;
    Ok(owners)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> Result<Vec<SeededOwner>, Box<dyn std::error::Error>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut query =
        String::from("INSERT INTO users (first_name, last_name, email, password, role_id) VALUES ");

    for i in 0..users.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 5;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3,
            param_idx + 4,
            param_idx + 5
        ));
    }

    query.push_str(" RETURNING id, role_id");

    let mut q = sqlx::query_as::<_, (UserId, RoleId)>(&query);
    for user in users {
        q = q
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role_id);
    }

    let rows = q.fetch_all(&mut **tx).await?;
    Ok(rows
        .into_iter()
        .map(|(user_id, role_id)| SeededOwner { user_id, role_id })
        .collect())
}

/// Clears all seeded users. Their documents must already be gone.
pub async fn clear_users(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded users...");

    let result = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(format!("%@{SEED_EMAIL_DOMAIN}"))
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} users in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
