//! # Middleware Module
//!
//! Middleware functions run before (or after) route handlers.
//!
//! ## Our Middleware
//! - `auth`: Rejects requests whose session is not logged in
//! - `no_cache`: Adds cache-prevention headers to the login routes' responses

pub mod auth;
pub mod no_cache;
