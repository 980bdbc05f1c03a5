//! # Router
//!
//! Assembles the handlers and middleware into one `Router`.
//!
//! There is no session layer: handlers read and write the login state through
//! the private cookie jar themselves (see `oauth::session`).

use crate::handlers::{auth, movies};
use crate::middleware::{auth::require_auth, no_cache::no_cache};
use crate::state::AppState;
use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let movie_routes = Router::<AppState>::new()
        .route(
            "/api/movies",
            get(movies::list_movies)
                .post(movies::create_movie)
                .delete(movies::delete_all_movies),
        )
        .route(
            "/api/movies/{id}",
            get(movies::get_movie).delete(movies::delete_movie),
        );

    // Login status and the OAuth redirects must never be served from a cache
    let auth_routes = Router::<AppState>::new()
        .route("/", get(auth::index))
        .route("/google/login", get(auth::login))
        .route("/google/auth", get(auth::callback))
        .route("/google/logout", get(auth::logout))
        .layer(axum_middleware::from_fn(no_cache));

    let protected_routes = Router::<AppState>::new()
        .route("/api/profile", get(auth::profile))
        .layer(axum_middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(movie_routes)
        .merge(auth_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
