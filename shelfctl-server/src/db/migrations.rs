//! Schema setup for the catalog tables
//!
//! Idempotent: safe to run on every startup.

use sqlx::PgPool;

use super::repos::DbError;

/// Create the users and books tables if they don't exist.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running catalog migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Deleting a user orphans their books rather than deleting them
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            user_id BIGINT REFERENCES users(id) ON DELETE SET NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_books_user ON books(user_id)")
        .execute(pool)
        .await?;

    tracing::info!("Catalog migrations complete");
    Ok(())
}
