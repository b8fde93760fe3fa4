//! Route definitions for the HTTP API.

pub mod books;
pub mod bulk;
pub mod debug;
pub mod health;
pub mod notes;
pub mod search;

use axum::{Router, http::Uri};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::middleware::request_id::{
    propagate_request_id_layer, request_span, set_request_id_layer,
};
use crate::state::AppState;

/// Build the complete router with all routes.
///
/// Debug routes are only mounted when the configuration enables them.
/// Every response carries an `x-request-id` header, and every request is
/// traced under a span holding that id.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(health::routes())
        .merge(books::routes())
        .merge(notes::routes())
        .merge(bulk::routes())
        .merge(search::routes());

    if state.config().enable_debug_routes {
        tracing::warn!("Debug routes enabled");
        router = router.merge(debug::routes());
    }

    router
        .fallback(route_not_found)
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(set_request_id_layer())
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route matches {}", uri.path()))
}

/// Router tests that stop before the database is reached.
///
/// The pool connects lazily to an address nothing listens on, so any
/// request that did reach the store would fail with a 500.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogFormat, ServerConfig};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use readnotes_store::Store;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_config(enable_debug_routes: bool) -> ServerConfig {
        ServerConfig {
            database_url: "postgres://readnotes@127.0.0.1:1/readnotes".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            cors_allowed_origins: "*".to_string(),
            enable_debug_routes,
            seed_demo_data: false,
        }
    }

    fn app_with(enable_debug_routes: bool) -> Router {
        let config = test_config(enable_debug_routes);
        let store = Store::connect_lazy(&config.database_url).unwrap();
        build_router(AppState::new(store, config))
    }

    fn app() -> Router {
        app_with(false)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Response) {
        let response = app.oneshot(request).await.unwrap();
        (response.status(), response)
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_root_and_healthz() {
        let (status, response) = send(app(), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"service": "Reading Notes Backend API", "status": "ok", "health": "/healthz"})
        );

        let (status, response) = send(app(), get("/healthz")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_request_id_is_generated_and_echoed() {
        let (_, response) = send(app(), get("/healthz")).await;
        assert!(response.headers().contains_key("x-request-id"));

        let request = Request::get("/healthz")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        let (_, response) = send(app(), request).await;
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn test_unknown_route_uses_envelope() {
        let (status, response) = send(app(), get("/api/nothing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json_body(response).await["errors"][0].is_string());
    }

    #[tokio::test]
    async fn test_non_integer_ids_are_not_found() {
        let (status, _) = send(app(), get("/api/books/abc/notes")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let request = Request::delete("/api/notes/xyz").body(Body::empty()).unwrap();
        let (status, response) = send(app(), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(!json_body(response).await["errors"].as_array().unwrap().is_empty());

        let (status, _) = send(app(), post_json("/api/books/1.5/notes/bulk", "{}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (status, response) = send(app(), post_json("/api/books", "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["errors"][0].is_string());
    }

    #[tokio::test]
    async fn test_missing_envelope_key_is_bad_request() {
        let (status, _) = send(app(), post_json("/api/books", r#"{"title": "x"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(app(), post_json("/api/books/1/notes", r#"{"page": 1}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, response) =
            send(app(), post_json("/api/books/1/notes", r#"{"note": "text"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({"errors": ["note must be an object"]})
        );
    }

    #[tokio::test]
    async fn test_bulk_shape_errors() {
        let cases = [
            (r#"{}"#, "notes must be provided"),
            (r#"{"notes": "x"}"#, "notes must be an array"),
            (r#"{"notes": [{"page": 1, "quote": "a"}, 7]}"#, "notes[1] must be an object"),
            (r#"{"notes": []}"#, "notes must be a non-empty array"),
        ];

        for (body, message) in cases {
            let (status, response) = send(app(), post_json("/api/books/1/notes/bulk", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(json_body(response).await, json!({"errors": [message]}));
        }
    }

    #[tokio::test]
    async fn test_bulk_over_limit_is_rejected_before_store() {
        let notes: Vec<_> = (1..=21).map(|p| json!({"page": p, "quote": "q"})).collect();
        let body = json!({ "notes": notes }).to_string();

        let (status, response) = send(app(), post_json("/api/books/1/notes/bulk", &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({"errors": ["too many notes (max 20)"]})
        );
    }

    #[tokio::test]
    async fn test_debug_routes_are_opt_in() {
        let (status, _) = send(app(), post_json("/api/debug/db_errors/check", "{}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, response) =
            send(app_with(true), post_json("/api/debug/db_errors/unique", "{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({"errors": ["unknown kind"]}));
    }
}
