//! Tracing initialization and subscriber setup.

use super::log_file::LogFile;
use crate::Config;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// The level comes from `config.trace_level` (default `"info"`) and accepts
/// any [`EnvFilter`] directive, e.g. `"pext_contract=debug"`. Events go to
/// `config.log_file` when set, otherwise to stderr. If the log file's
/// directory cannot be created, stderr is used instead.
///
/// Only the first call in a process takes effect.
///
/// # Example
///
/// ```rust
/// use pext_contract::observability::init_tracing;
/// use pext_contract::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let log_file = config.log_file.as_ref().and_then(|path| {
        let dir = path.parent().filter(|dir| !dir.as_os_str().is_empty());
        match dir.map(std::fs::create_dir_all).transpose() {
            Ok(_) => Some(Arc::new(LogFile::new(path.clone()))),
            Err(_) => None,
        }
    });

    let stderr_layer = log_file
        .is_none()
        .then(|| fmt::layer().with_writer(std::io::stderr));
    let file_layer = log_file.map(|file| fmt::layer().with_ansi(false).with_writer(file));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
}
