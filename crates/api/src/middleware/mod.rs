//! HTTP middleware components.

pub mod auth;
pub mod logging;
pub mod metrics;

pub use auth::{require_admin, require_auth, AuthUser};
pub use metrics::{init_metrics, metrics_handler, metrics_middleware};
