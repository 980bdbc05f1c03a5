//! # Database Models
//!
//! This module defines the data structures that map to the `movie` table and the
//! JSON shapes the movie endpoints accept and return.

use serde::{Deserialize, Serialize};

/// A row of the `movie` table
///
/// ## Derive Macros Explained
/// - `Serialize`: JSON conversion for the API responses
/// - `sqlx::FromRow`: Automatically maps database rows to this struct
///
/// ## Example JSON
/// ```json
/// { "id": 1, "name": "Inception" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Movie {
    /// Primary key, generated by the database
    pub id: i64,

    /// Title; absent names are stored as NULL and serialized as `null`
    pub name: Option<String>,
}

/// Body of `POST /api/movies`
///
/// `name` may be omitted entirely; `{}` creates a movie without a name.
#[derive(Debug, Deserialize)]
pub struct NewMovie {
    #[serde(default)]
    pub name: Option<String>,
}

/// Response of `DELETE /api/movies`
#[derive(Debug, Serialize)]
pub struct DeletedMovies {
    pub num_rows_del: u64,
}

/// Result of deleting a single movie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}
