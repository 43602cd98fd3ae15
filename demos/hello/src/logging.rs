use std::env;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

/// Sets up hourly-rolled file logging under `dir`, honoring `RUST_LOG` if it
/// is set. Keep the returned guard alive for the whole program.
pub fn init_logging(app_name: &str, dir: &str, level: &str) -> WorkerGuard {
    let appender = tracing_appender::rolling::hourly(dir, app_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::Layer::new().with_writer(writer).with_ansi(false);

    // Use env RUST_LOG to initialize log if present.
    // Otherwise, use the specified level.
    let directives =
        env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_x| level.to_string());
    let env_filter = EnvFilter::new(directives);

    let subscriber = Registry::default().with(env_filter).with(file_layer);
    tracing::subscriber::set_global_default(subscriber)
        .expect("error setting global tracing subscriber");

    tracing::info!(
        "initialized global tracing: in {}/{} at {}",
        dir,
        app_name,
        level
    );
    guard
}
