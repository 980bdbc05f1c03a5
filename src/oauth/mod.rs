//! # OAuth Module
//!
//! Browser login through an OAuth2 provider (Google by default) using the
//! Authorization Code flow.
//!
//! ## Submodules
//! - `types`: Token set, profile and callback query types
//! - `client`: HTTP client for the provider's token and user-info endpoints
//! - `session`: Typed view of the login state kept in the session
//! - `flow`: The login / callback / logout / profile steps
//!
//! ## Flow Overview
//! 1. `GET /google/login` → `flow::begin_login()` stores a fresh nonce and
//!    redirects the browser to the provider
//! 2. The user consents; the provider redirects to `/google/auth?state=..&code=..`
//! 3. `flow::complete_login()` checks `state` against the stored nonce, exchanges
//!    the code for tokens and stores them in the session
//! 4. `flow::fetch_profile()` reads the user's profile with the stored access token
//! 5. `GET /google/logout` → `flow::logout()` forgets everything

pub mod client;
pub mod flow;
pub mod session;
pub mod types;
