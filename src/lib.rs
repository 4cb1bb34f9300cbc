pub mod api;
pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod flow;
pub mod models;
pub mod service;
pub mod session;
pub mod storage;
pub mod transport;
pub mod validation;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use context::AppContext;
pub use error::app_error::{AppError, ErrorKind};
pub use flow::{FlowState, SubmitOutcome};

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Does nothing if one is already set.
pub fn init_tracing(log_level: &str, json_format: bool) {
    // RUST_LOG takes precedence over the configured level, e.g.
    //   RUST_LOG=debug                          - everything at debug
    //   RUST_LOG=info,civic_client::api=debug   - request logging only
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_line_number(true);

    let _ = if json_format { subscriber.json().try_init() } else { subscriber.try_init() };
}
