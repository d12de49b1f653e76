//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::cors::apply_cors;
use super::handlers::{
    character_handler, delete_handler, health_handler, load_handler, method_not_allowed,
    not_found, save_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// Each path accepts exactly one method; other methods get a JSON 405.
///
/// # Middleware
/// - Body limit: `state.body_limit` bytes, 413 beyond it
/// - CORS: static allow-list, `OPTIONS` short-circuit
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = middleware::from_fn_with_state(state.cors.clone(), apply_cors);
    let body_limit = DefaultBodyLimit::max(state.body_limit);

    Router::new()
        .route(
            "/api/character",
            get(character_handler).fallback(method_not_allowed),
        )
        .route("/api/save", post(save_handler).fallback(method_not_allowed))
        .route("/api/load", get(load_handler).fallback(method_not_allowed))
        .route(
            "/api/delete",
            delete(delete_handler).fallback(method_not_allowed),
        )
        .route("/health", get(health_handler).fallback(method_not_allowed))
        .fallback(not_found)
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::proxy::FetchProxy;
    use crate::store::DocumentStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let store = DocumentStore::new(Arc::new(MemoryBackend::new()));
        let proxy = FetchProxy::new(Duration::from_secs(5)).unwrap();
        create_router(AppState::new(store, proxy))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wrong_method_is_405() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/save")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_options_short_circuits() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/delete?key=hero1")
                    .header("origin", "http://localhost:4200")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:4200"
        );
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
