/**
 * Router Configuration
 *
 * Combines the route groups and wraps them in the request pipeline.
 *
 * # Pipeline (outermost first)
 *
 * 1. Security headers
 * 2. CORS
 * 3. Request logging (`TraceLayer`)
 * 4. Conditional JSON body parser, skipping the upload path
 * 5. Terminal fault handler
 * 6. Catch-panic
 *
 * Each `Router::layer` call wraps everything applied before it, so the
 * outer three are layered last. The body parser must sit in front of
 * every route so a malformed body is refused before any handler runs, and
 * it must decide to skip the upload path before reading anything. The fault handler sits inside the parser
 * so it only ever sees responses produced by route code.
 *
 * # Fallback
 *
 * Unmatched routes answer a structured 404 naming the method and path,
 * including a known path asked for with a method it does not serve.
 */

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, Uri},
    middleware,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::{
    conditional_json_body, panic_response, security_headers, terminal_fault_handler,
    JsonBodyParser, UPLOAD_PATH,
};
use crate::backend::routes::api_routes::{protected_routes, public_routes};
use crate::backend::routes::health::{health, HEALTH_PATHS};
use crate::backend::server::state::AppState;

/// Any origin unless origins are configured
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
}

async fn route_not_found(method: Method, uri: Uri) -> BackendError {
    tracing::debug!("No route for {} {}", method, uri.path());
    BackendError::route_not_found(method, uri.path())
}

/// Apply the request pipeline to a router
///
/// Split out from [`create_router`] so tests can wrap extra routes (a
/// panicking handler, a slow one) in the exact production pipeline.
pub fn with_pipeline(router: Router<AppState>, app_state: AppState) -> Router<()> {
    let config = app_state.config.clone();
    let parser = JsonBodyParser::new(UPLOAD_PATH, config.max_json_body_bytes);

    // closest to the routes
    let inner = ServiceBuilder::new()
        .layer(middleware::from_fn_with_state(parser, conditional_json_body))
        .layer(middleware::from_fn_with_state(
            config.environment,
            terminal_fault_handler,
        ))
        .layer(CatchPanicLayer::custom(panic_response));

    router
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(DefaultBodyLimit::max(config.max_json_body_bytes))
        .layer(inner)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
        .layer(middleware::from_fn(security_headers))
        .with_state(app_state)
}

/// Create the application router
pub fn create_router(app_state: AppState) -> Router<()> {
    let mut router = Router::new();
    for path in HEALTH_PATHS {
        router = router.route(path, get(health));
    }

    let router = router
        .merge(public_routes())
        .merge(protected_routes(&app_state));

    with_pipeline(router, app_state)
}
