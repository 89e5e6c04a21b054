/**
 * Server Initialization
 *
 * # Startup
 *
 * 1. Build `AppState` around a fresh [`Lifecycle`]
 * 2. Assemble the router and pipeline
 * 3. Bind; an occupied port ends startup here
 * 4. Schedule the demo-account seed (delayed, non-blocking)
 * 5. Serve until Ctrl+C / SIGTERM, then drain
 */

use std::sync::Arc;

use axum::Router;
use tokio::task::JoinHandle;

use crate::backend::auth::seed::ensure_demo_account;
use crate::backend::routes::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::lifecycle::{self, Lifecycle, LifecycleError};
use crate::backend::server::state::AppState;

/// Build the application router for `app_state`
pub fn create_app(app_state: AppState) -> Router<()> {
    tracing::info!(
        "Initializing docchat backend ({} environment)",
        app_state.config.environment
    );
    create_router(app_state)
}

/// Seed the demo account once the configured delay has passed
pub fn schedule_demo_seed(app_state: &AppState) -> JoinHandle<bool> {
    let users = app_state.users.clone();
    let cost = app_state.config.bcrypt_cost;

    lifecycle::schedule_bootstrap(
        app_state.lifecycle.clone(),
        app_state.config.demo_seed_delay,
        move || async move { ensure_demo_account(&users, cost).await.map(|_| ()) },
    )
}

/// Run the server until a termination signal
pub async fn run(config: ServerConfig) -> Result<(), LifecycleError> {
    let addr = config.socket_addr().await?;
    let seed_enabled = config.demo_seed_enabled;

    let app_state = AppState::new(config, Arc::new(Lifecycle::new()));
    let app = create_app(app_state.clone());

    let listener = lifecycle::bind(addr, &app_state.lifecycle).await?;

    if seed_enabled {
        schedule_demo_seed(&app_state);
    }

    lifecycle::serve(
        listener,
        app,
        app_state.lifecycle.clone(),
        lifecycle::shutdown_signal(),
    )
    .await
}
