//! Router configuration for the whisperbox API.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    accept_messages_status, check_username_unique, delete_message, get_messages, me, send_message,
    sign_in, sign_up, update_accept_messages, verify_code, AppState,
};
use super::middleware::{create_cors_layer, jwt_auth, JwtState};

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    jwt_state: Arc<JwtState>,
    cors_origins: &[String],
) -> Router {
    // Routes open to anonymous callers
    let public_routes = Router::new()
        .route("/sign-up", post(sign_up))
        .route("/check-username-unique", get(check_username_unique))
        .route("/verify-code", post(verify_code))
        .route("/sign-in", post(sign_in))
        .route("/send-message", post(send_message));

    // Routes requiring a bearer token
    let protected_routes = Router::new()
        .route("/me", get(me))
        .route(
            "/accept-messages",
            get(accept_messages_status).post(update_accept_messages),
        )
        .route("/get-messages", get(get_messages))
        .route("/delete-message/:id", delete(delete_message));

    // Combine API routes
    let api_routes = Router::new().merge(public_routes).merge(protected_routes);

    // Clone jwt_state for the middleware closure
    let jwt_state_for_middleware = jwt_state.clone();

    // Build the main router with middleware
    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let state = jwt_state_for_middleware.clone();
                    jwt_auth(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
        // Should not panic
    }
}
