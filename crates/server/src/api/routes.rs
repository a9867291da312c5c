use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::middleware::{auth_middleware, metrics_middleware};
use super::{ai, handlers, lookups, recipes, users};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        // Health, config and metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::get_metrics))
        // Recipes (read)
        .route("/recipes", get(recipes::search_recipes))
        .route("/recipes/{id}", get(recipes::get_recipe))
        // Reference data
        .route("/cuisines", get(lookups::list_cuisines))
        .route("/tags", get(lookups::list_tags))
        // AI search
        .route("/ai/recipes", get(ai::search_recipes))
        // Users
        .route("/users", post(users::create_user))
        .route("/login", post(users::login));

    let protected_routes = Router::new()
        .route("/recipes", post(recipes::create_recipe))
        .route(
            "/recipes/{id}",
            put(recipes::update_recipe).delete(recipes::delete_recipe),
        )
        .route("/ai/recipes", post(ai::generate_recipe))
        .route("/protected", get(users::protected))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth_middleware,
        ));

    public_routes
        .merge(protected_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
