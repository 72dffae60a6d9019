//! HTTP surface of the practice engine.

pub mod config;
pub mod error;
pub mod methods;
pub mod metrics;
pub mod middleware;
pub mod practice;
pub mod progress;
pub mod router;
pub mod skills;
pub mod state;
pub mod tracing;

pub use config::ApiConfig;
pub use state::ApiState;
