//! Schema definitions and migration utilities.
//!
//! The migrations are embedded SQL files. Each one is written to be safe
//! to run repeatedly, so start-up simply executes all of them in order.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded migration SQL for the books table (001_books.sql).
pub const BOOKS_MIGRATION: &str = include_str!("../../../migrations/001_books.sql");

/// Embedded migration SQL for the notes table (002_notes.sql).
pub const NOTES_MIGRATION: &str = include_str!("../../../migrations/002_notes.sql");

/// Migrations in the order they must run.
pub const MIGRATIONS: &[(&str, &str)] = &[
    ("001_books.sql", BOOKS_MIGRATION),
    ("002_notes.sql", NOTES_MIGRATION),
];

/// Advisory lock key held while migrations run.
const MIGRATION_LOCK_KEY: i64 = 0x7265_6164_6e6f_7465;

/// Run all migrations against the database.
///
/// This function is idempotent - it can be run multiple times safely.
/// Migrations run in one transaction under an advisory lock, so
/// processes starting at the same time apply them one after another.
///
/// # Errors
///
/// Returns an error if any migration fails to execute.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running database migrations...");

    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(MIGRATION_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    for (name, sql) in MIGRATIONS {
        tracing::debug!("Running migration ({})...", name);
        sqlx::raw_sql(sql)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::MigrationError(format!("{} failed: {}", name, e)))?;
    }

    tx.commit().await?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// Check if the schema has been initialized.
///
/// Returns true if both the `books` and `notes` tables exist.
pub async fn is_schema_initialized(pool: &PgPool) -> StoreResult<bool> {
    let result: (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM information_schema.tables
        WHERE table_schema = 'public'
        AND table_name IN ('books', 'notes')
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(result.0 == 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_books_migration_embedded() {
        assert!(BOOKS_MIGRATION.contains("CREATE TABLE IF NOT EXISTS books"));
        assert!(BOOKS_MIGRATION.contains("title       VARCHAR NOT NULL"));
        assert!(BOOKS_MIGRATION.contains("deleted_at"));
    }

    #[test]
    fn test_notes_migration_embedded() {
        assert!(NOTES_MIGRATION.contains("CREATE TABLE IF NOT EXISTS notes"));
        assert!(NOTES_MIGRATION.contains("ON DELETE RESTRICT"));
        assert!(NOTES_MIGRATION.contains("page        INTEGER NOT NULL"));
        assert!(NOTES_MIGRATION.contains("notes_page_positive CHECK (page >= 1)"));
        assert!(NOTES_MIGRATION.contains("char_length(quote) <= 1000"));
        assert!(NOTES_MIGRATION.contains("char_length(memo) <= 2000"));
    }

    #[test]
    fn test_migrations_run_books_first() {
        let names: Vec<_> = MIGRATIONS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["001_books.sql", "002_notes.sql"]);
    }
}
