//! # HTTP Request Handlers
//!
//! ## Submodules
//! - `movies`: Movie CRUD endpoints under `/api/movies`
//! - `auth`: Index page, Google login/callback/logout and the profile endpoint
//!
//! ## Handler Pattern
//! Handlers are async functions that:
//! 1. Extract data from request (path params, query params, JSON body, session)
//! 2. Call the store or the OAuth flow
//! 3. Return a response (JSON, plain text, redirect)

pub mod auth;
pub mod movies;
