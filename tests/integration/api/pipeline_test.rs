//! Request pipeline tests
//!
//! Ordering, the upload-path skip, security headers, fallback and the
//! terminal fault handler.

mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use docchat::backend::error::BackendError;
    use docchat::backend::routes::{create_router, with_pipeline};
    use docchat::backend::server::config::Environment;
    use docchat::backend::server::AppState;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::common::*;
    use crate::{assert_contains, assert_error_body};

    fn app() -> (AppState, Router) {
        let state = test_state();
        (state.clone(), create_router(state))
    }

    /// Production pipeline around routes that fail on purpose
    fn failing_app(environment: Environment) -> Router {
        let mut config = test_config();
        config.environment = environment;
        let state = state_with(config);

        let routes = Router::new()
            .route(
                "/boom",
                get(|| async {
                    if true {
                        panic!("kaboom in handler");
                    }
                    "unreachable"
                }),
            )
            .route(
                "/fault",
                get(|| async { Err::<String, _>(BackendError::internal("store offline")) }),
            );
        with_pipeline(routes, state)
    }

    #[tokio::test]
    async fn test_health_on_every_path() {
        let (_, app) = app();
        for uri in ["/", "/health", "/api/health"] {
            let response = send(app.clone(), get_request(uri)).await;
            assert_eq!(response.status, StatusCode::OK, "{}", uri);
            assert_eq!(response.body["status"], "ok");
            assert_eq!(response.body["environment"], "test");
            assert!(response.body["uptimeSeconds"].is_u64());
            assert!(response.body["timestamp"].is_string());
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_structured_404() {
        let (_, app) = app();
        let response = send(app, get_request("/api/nope")).await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(
            response.body,
            json!({ "error": "Route not found: GET /api/nope", "status": 404 })
        );
    }

    #[tokio::test]
    async fn test_unserved_method_on_known_path_is_structured_404() {
        let (_, app) = app();
        let request = Request::builder()
            .method("DELETE")
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = send(app.clone(), request).await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(
            response.body,
            json!({ "error": "Route not found: DELETE /health", "status": 404 })
        );
        assert!(response.headers.contains_key("x-content-type-options"));

        let request = Request::builder()
            .method("PATCH")
            .uri("/api/auth/login")
            .body(Body::empty())
            .unwrap();
        let response = send(app, request).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_error_body!(response.body, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_protected_prefix_is_404_not_401() {
        let (_, app) = app();
        let response = send(app, get_request("/api/documents/x/y/z")).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let (_, app) = app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header("content-type", "application/json")
            .body(Body::from("{\"email\": "))
            .unwrap();

        let response = send(app, request).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_error_body!(response.body, StatusCode::BAD_REQUEST);
        assert_contains!(response.body["error"].as_str().unwrap(), "Malformed JSON body");
    }

    #[tokio::test]
    async fn test_declared_oversize_json_is_413() {
        let mut config = test_config();
        config.max_json_body_bytes = 16;
        let app = create_router(state_with(config));

        let body = json!({ "email": "someone@example.com", "password": "long enough" });
        let response = send(app, post_json("/api/auth/login", None, &body)).await;
        assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_error_body!(response.body, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_json_parsing_runs_before_auth() {
        let (_, app) = app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/documents/00000000-0000-0000-0000-000000000000/summary")
            .header("content-type", "application/json")
            .body(Body::from("not json"))
            .unwrap();

        let response = send(app, request).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_path_is_never_json_parsed() {
        let (_, app) = app();
        // Labelled JSON but not JSON: parsing would answer 400, the skip
        // lets it through to the bearer guard instead.
        let request = Request::builder()
            .method("POST")
            .uri("/api/documents/upload")
            .header("content-type", "application/json")
            .body(Body::from("--boundary\r\nnot json at all"))
            .unwrap();

        let response = send(app, request).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_multipart_upload_reaches_handler() {
        let (state, app) = app();
        let user = create_unique_test_user(&state).await;

        let body = multipart_body("document", "notes.txt", "text/plain", b"Plain words.");
        let response = send(app, upload(Some(&user.token), body)).await;

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["status"], "ready");
    }

    #[tokio::test]
    async fn test_security_headers_everywhere() {
        let (_, app) = app();
        for uri in ["/health", "/missing"] {
            let response = send(app.clone(), get_request(uri)).await;
            let headers = &response.headers;
            assert_eq!(headers["x-content-type-options"], "nosniff");
            assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
            assert_eq!(headers["referrer-policy"], "no-referrer");
            assert!(headers.contains_key("strict-transport-security"));
        }
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin_by_default() {
        let (_, app) = app();
        let request = Request::builder()
            .uri("/health")
            .header("origin", "http://localhost:3000")
            .body(Body::empty())
            .unwrap();

        let response = send(app, request).await;
        assert_eq!(response.headers["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_panic_becomes_500_with_detail_outside_production() {
        let response = send(failing_app(Environment::Development), get_request("/boom")).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body["error"], "Internal server error");
        assert_contains!(response.body["detail"].as_str().unwrap(), "kaboom in handler");
        assert_eq!(response.headers["x-content-type-options"], "nosniff");
    }

    #[tokio::test]
    async fn test_panic_detail_hidden_in_production() {
        let response = send(failing_app(Environment::Production), get_request("/boom")).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.body,
            json!({ "error": "Internal server error", "status": 500 })
        );
    }

    #[tokio::test]
    async fn test_handler_fault_goes_through_terminal_handler() {
        let dev = send(failing_app(Environment::Test), get_request("/fault")).await;
        assert_eq!(dev.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(dev.body["detail"], "store offline");

        let prod = send(failing_app(Environment::Production), get_request("/fault")).await;
        assert!(prod.body.get("detail").is_none());
        assert_eq!(prod.body["error"], "Internal server error");
    }
}
