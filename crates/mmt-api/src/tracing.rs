//! Log output setup.
//!
//! Development builds print pretty, source-located logs; production builds emit
//! one JSON object per event so request, player and skill fields stay queryable.
//! `RUST_LOG` overrides the default filter in both modes.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Filter used when `RUST_LOG` is unset
pub fn default_filter(env: &Environment) -> &'static str {
    if env.is_development() {
        "debug,tower_http=debug"
    } else {
        "info,tower_http=info"
    }
}

/// Install the global subscriber for `env`. Call once at startup.
pub fn init_tracing(env: &Environment) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(env)));

    if env.is_development() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .pretty()
                    .with_filter(env_filter),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .flatten_event(true)
                    .with_target(true)
                    .with_filter(env_filter),
            )
            .init();
    }

    tracing::info!(environment = ?env, "Tracing initialized");
}
