pub mod config;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod result_store;

use tracing_subscriber::EnvFilter;

/// Initialize tracing once per process. Logs go to stderr so stdout stays
/// free for reports and JSON.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
