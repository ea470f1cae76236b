//! Document seeding functionality.

use docvault_models::AccessLevel;
use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::{DocumentSeed, SEED_EMAIL_DOMAIN, SeededOwner};

/// Generates `per_owner` documents for each owner, cycling through the
/// access levels so every visibility rule has data to work on.
pub fn generate_documents(owners: &[SeededOwner], per_owner: usize) -> Vec<DocumentSeed> {
    owners
        .par_iter()
        .flat_map(|owner| {
            (0..per_owner)
                .map(|idx| generate_document(owner, idx))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn generate_document(owner: &SeededOwner, idx: usize) -> DocumentSeed {
    let sentence: String = Sentence(2..6).fake();
    let content: String = Paragraph(3..8).fake();

    // Titles are unique per owner.
    let title = format!("{} #{}", sentence.trim_end_matches('.'), idx + 1);

    DocumentSeed {
        title,
        content,
        access: AccessLevel::ALL[idx % AccessLevel::ALL.len()],
        user_id: owner.user_id,
        user_role_id: owner.role_id,
    }
}

/// Seeds documents for the given owners
pub async fn seed_documents(
    db: &PgPool,
    owners: &[SeededOwner],
    per_owner: usize,
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "📄 Seeding {} documents ({} per user)...",
        owners.len() * per_owner,
        per_owner
    );

    let documents = generate_documents(owners, per_owner);
    let inserted = insert_documents_batch(db, &documents).await?;

    println!(
        "   ✓ Inserted {} documents in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

pub async fn insert_documents_batch(
    db: &PgPool,
    documents: &[DocumentSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    // 5 params per document
    const BATCH_SIZE: usize = 1000;

    let mut inserted = 0;
    for chunk in documents.chunks(BATCH_SIZE) {
        inserted += insert_documents_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;
    Ok(inserted)
}

async fn insert_documents_chunk(
    tx: &mut Transaction<'_, Postgres>,
    documents: &[DocumentSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    if documents.is_empty() {
        return Ok(0);
    }

    let mut query = String::from(
        "INSERT INTO documents (title, content, access, user_id, user_role_id) VALUES ",
    );

    for i in 0..documents.len() {
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

    let mut q = sqlx::query(&query);
    for document in documents {
        q = q
            .bind(&document.title)
            .bind(&document.content)
            .bind(document.access)
            .bind(document.user_id)
            .bind(document.user_role_id);
    }

    Ok(q.execute(&mut **tx).await?.rows_affected())
}

/// Clears every document owned by a seeded user
pub async fn clear_documents(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded documents...");

    let result = sqlx::query(
        "DELETE FROM documents d USING users u
         WHERE d.user_id = u.id AND u.email LIKE $1",
    )
    .bind(format!("%@{SEED_EMAIL_DOMAIN}"))
    .execute(db)
    .await?
    .rows_affected();

    println!(
        "   ✓ Deleted {} documents in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
