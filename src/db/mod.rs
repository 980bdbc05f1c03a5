//! # Database Module
//!
//! - `models`: Data structures (Movie and its request/response shapes)
//! - `movies`: Operations on the `movie` table
//!
//! The schema is a single table, created at startup if missing.

pub mod models;
pub mod movies;

use sqlx::SqlitePool;

const CREATE_MOVIE_TABLE: &str = "CREATE TABLE IF NOT EXISTS movie (
    id   INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    name TEXT
)";

/// Create the `movie` table if it does not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_MOVIE_TABLE).execute(pool).await?;
    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    use sqlx::sqlite::SqlitePoolOptions;

    // Every connection to `sqlite::memory:` is its own database, so pin the pool to one.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    init_schema(&pool).await.expect("schema");
    pool
}
