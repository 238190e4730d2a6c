use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handlers, middleware, movies};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Reads stay open; config and every mutating route require credentials
    let public_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::get_metrics))
        .route("/movies", get(movies::list_movies))
        .route("/movies/{token}", get(movies::get_movie));

    let protected_routes = Router::new()
        .route("/config", get(handlers::get_config))
        .route("/movies", post(movies::create_movie))
        .route("/movies/{token}", put(movies::update_movie))
        .route("/movies/{token}", delete(movies::delete_movie))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    let api_routes = public_routes.merge(protected_routes).with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(from_fn(middleware::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
