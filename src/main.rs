//! # Movie Server
//!
//! A small JSON API over a `movie` table, plus a browser login through Google
//! using the OAuth2 Authorization Code flow.
//!
//! ## Key Concepts
//! - **Movie Store**: list/create/delete over one SQLite table
//! - **Session Auth Flow**: login state carried in an encrypted, signed cookie
//! - **Authorization Code flow**: redirect to the provider, receive a code, exchange it for tokens

// Module declarations - organize code into logical components
mod config;      // Configuration management (environment variables, settings)
mod db;          // Database operations (the movie table)
mod error;       // Error handling and custom error types
mod handlers;    // HTTP request handlers (routes)
mod middleware;  // Request/response interceptors (auth check, no-cache headers)
mod oauth;       // OAuth2 provider client and login flow
mod routes;      // Router assembly
mod state;       // Shared application state


use crate::config::Config;
use crate::state::AppState;
// Structured logging setup
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main application entry point
///
/// This function:
/// 1. Sets up logging
/// 2. Loads configuration from environment variables
/// 3. Connects to the database and builds the OAuth client
/// 4. Builds the router (tracing, middleware, routes)
/// 5. Starts the HTTP server
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default: info level for most crates, debug level for our app
    // Can be overridden with RUST_LOG environment variable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,movie_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Secrets print as [REDACTED]
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    let app_state = AppState::new(&config).await?;
    tracing::info!("Application state initialized");

    let app = routes::build_router(app_state);

    let bind_addr = config.bind_address();
    tracing::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
