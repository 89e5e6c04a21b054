//! Server Module
//!
//! ```text
//! server/
//! ├── mod.rs        - Module exports
//! ├── config.rs     - Environment-driven configuration
//! ├── state.rs      - AppState and FromRef implementations
//! ├── lifecycle.rs  - Phases, bind, bootstrap scheduling, graceful serve
//! └── init.rs       - App assembly and the `run` entry point
//! ```

/// Server configuration loading
pub mod config;

/// Application state management
pub mod state;

/// Process lifecycle
pub mod lifecycle;

/// Server initialization
pub mod init;

pub use config::{ConfigError, Environment, ServerConfig};
pub use init::{create_app, run, schedule_demo_seed};
pub use lifecycle::{Lifecycle, LifecycleError, Phase};
pub use state::AppState;
