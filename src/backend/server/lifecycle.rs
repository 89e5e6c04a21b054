/**
 * Server Lifecycle
 *
 * The process moves through four phases, forward only:
 *
 * ```text
 * Starting → Listening → ShuttingDown → Terminated
 * ```
 *
 * - `bind` opens the socket and enters `Listening`. An occupied port is
 *   reported as [`LifecycleError::AddrInUse`]; the binary exits on it.
 * - `schedule_bootstrap` runs a delayed auxiliary task after the server is
 *   up. Its failure is logged and never changes the phase.
 * - `serve` runs axum until the shutdown future resolves, enters
 *   `ShuttingDown`, lets in-flight requests drain, then `Terminated`.
 *
 * Each server instance owns its own [`Lifecycle`], so tests can run many
 * servers side by side in one process.
 */

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use axum::Router;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::backend::server::config::{ConfigError, Environment};
use crate::shared::HealthResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Starting,
    Listening,
    ShuttingDown,
    Terminated,
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("address {0} is already in use")]
    AddrInUse(SocketAddr),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),

    #[error("invalid lifecycle transition {from:?} -> {to:?}")]
    InvalidTransition { from: Phase, to: Phase },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug)]
pub struct Lifecycle {
    phase: watch::Sender<Phase>,
    started_at: DateTime<Utc>,
    started: Instant,
    local_addr: OnceLock<SocketAddr>,
    demo_seeded: AtomicBool,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        let (phase, _) = watch::channel(Phase::Starting);
        Self {
            phase,
            started_at: Utc::now(),
            started: Instant::now(),
            local_addr: OnceLock::new(),
            demo_seeded: AtomicBool::new(false),
        }
    }

    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    /// Resolve once the lifecycle has reached `phase` (or gone past it)
    pub async fn reached(&self, phase: Phase) {
        let mut receiver = self.subscribe();
        // the sender lives in `self`, so the channel cannot close here
        let _ = receiver.wait_for(|current| *current >= phase).await;
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr.get().copied()
    }

    pub fn demo_seeded(&self) -> bool {
        self.demo_seeded.load(Ordering::Acquire)
    }

    /// Liveness payload. Reads nothing but the lifecycle itself.
    pub fn health(&self, environment: Environment) -> HealthResponse {
        HealthResponse {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            uptime_seconds: self.uptime().as_secs(),
            environment: environment.to_string(),
        }
    }

    fn advance(&self, to: Phase) -> Result<(), LifecycleError> {
        let mut from = to;
        let moved = self.phase.send_if_modified(|current| {
            from = *current;
            if to > *current {
                *current = to;
                true
            } else {
                false
            }
        });

        if moved {
            tracing::info!("Lifecycle: {:?} -> {:?}", from, to);
            Ok(())
        } else {
            Err(LifecycleError::InvalidTransition { from, to })
        }
    }
}

/// Bind the listening socket and enter `Listening`
pub async fn bind(addr: SocketAddr, lifecycle: &Lifecycle) -> Result<TcpListener, LifecycleError> {
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
            tracing::error!("Port already in use: {}", addr);
            return Err(LifecycleError::AddrInUse(addr));
        }
        Err(e) => return Err(LifecycleError::Bind { addr, source: e }),
    };

    let local = listener
        .local_addr()
        .map_err(|e| LifecycleError::Bind { addr, source: e })?;
    let _ = lifecycle.local_addr.set(local);

    lifecycle.advance(Phase::Listening)?;
    tracing::info!("Listening on http://{}", local);
    Ok(listener)
}

/// Run `task` after `delay` without blocking the caller
///
/// Errors and panics are logged and swallowed. The handle resolves to
/// whether the task ran and succeeded; success also sets the lifecycle's
/// demo-seed flag. Skipped if the server is already shutting down.
pub fn schedule_bootstrap<F, Fut, E>(
    lifecycle: Arc<Lifecycle>,
    delay: Duration,
    task: F,
) -> JoinHandle<bool>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        if lifecycle.phase() >= Phase::ShuttingDown {
            tracing::debug!("Skipping bootstrap task, server is {:?}", lifecycle.phase());
            return false;
        }

        match tokio::spawn(task()).await {
            Ok(Ok(())) => {
                lifecycle.demo_seeded.store(true, Ordering::Release);
                tracing::info!("Bootstrap task completed");
                true
            }
            Ok(Err(e)) => {
                tracing::error!("Bootstrap task failed: {}", e);
                false
            }
            Err(e) => {
                tracing::error!("Bootstrap task panicked: {}", e);
                false
            }
        }
    })
}

/// Serve `app` until `shutdown` resolves, then drain
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    lifecycle: Arc<Lifecycle>,
    shutdown: F,
) -> Result<(), LifecycleError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let on_shutdown = {
        let lifecycle = lifecycle.clone();
        async move {
            shutdown.await;
            if let Err(e) = lifecycle.advance(Phase::ShuttingDown) {
                tracing::warn!("{}", e);
            }
            tracing::info!("No longer accepting connections, draining in-flight requests");
        }
    };

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(on_shutdown)
        .await
        .map_err(LifecycleError::Serve);

    // a serve error may skip ShuttingDown; Terminated is reached either way
    if let Err(e) = lifecycle.advance(Phase::Terminated) {
        tracing::warn!("{}", e);
    }
    tracing::info!("Server shutdown complete");
    result
}

/// Resolves on Ctrl+C, or SIGTERM on Unix
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
