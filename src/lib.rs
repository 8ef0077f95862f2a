// SPDX-License-Identifier: MIT

//! EVShare Dashboard client core.
//!
//! This crate is the headless session and authorization layer of the EVShare
//! co-ownership dashboard: token hydration from persisted storage, the
//! canonical role table, the route-level authorization gate, and the
//! boundary adapters for the backend REST API.

pub mod api;
pub mod config;
pub mod error;
pub mod gate;
pub mod models;
pub mod session;
pub mod storage;

pub use config::ClientConfig;
pub use error::{AppError, Result};
pub use gate::{AuthorizationGate, GateDecision};
pub use models::{Principal, Role, SessionRecord};
pub use session::SessionStore;
pub use storage::{FileStorage, MemoryStorage, SessionStorage};

/// Initialize structured JSON logging for the host application.
///
/// Call once at boot, before the first `hydrate()`.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("evshare_dashboard=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
