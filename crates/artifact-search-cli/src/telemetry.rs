//! Structured logging setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global subscriber
///
/// `RUST_LOG` wins over the configured level. Output goes to stderr so that
/// command output on stdout stays machine-readable.
pub fn init(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.json_format {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_timer(fmt::time::SystemTime)
                    .with_target(config.include_target)
                    .with_thread_ids(config.include_thread_ids)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_timer(fmt::time::SystemTime)
                    .with_target(config.include_target)
                    .with_thread_ids(config.include_thread_ids)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
