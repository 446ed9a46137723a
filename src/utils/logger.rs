use crate::utils::config::LoggingConfig;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level. JSON output is
/// meant for production log shipping; pretty output for terminals.
pub fn init_logger(level: &str, json_output: bool, log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    let file_writer = log_file.map(|path| {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .unwrap_or_else(|e| panic!("failed to open log file {}: {e}", path.display()));
        Arc::new(file)
    });

    match (json_output, file_writer) {
        (true, Some(writer)) => registry.with(fmt::layer().json().with_writer(writer)).init(),
        (true, None) => registry.with(fmt::layer().json()).init(),
        (false, Some(writer)) => registry
            .with(fmt::layer().with_ansi(false).with_writer(writer))
            .init(),
        (false, None) => registry.with(fmt::layer().pretty()).init(),
    }
}

/// Initialize logger from config
pub fn init_from_config(config: &LoggingConfig) {
    let json = config.output == "json";
    let log_file = if config.file_path.is_empty() {
        None
    } else {
        Some(Path::new(&config.file_path))
    };

    init_logger(&config.level, json, log_file);
}
