//! Logging Infrastructure
//!
//! Plain fmt output for one-shot subcommands; a `tui-logger` layer for the
//! terminal console, where stdout belongs to the UI. Both optionally mirror
//! to a daily rolling file.

use std::path::Path;

use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "turnstile-console";

fn file_appender(log_dir: Option<&str>) -> Option<RollingFileAppender> {
    let dir = log_dir?;
    if !Path::new(dir).exists() {
        return None;
    }
    Some(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
}

/// Initialize the logger for command-line use
pub fn init_logger(log_level: &str, log_dir: Option<&str>) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(appender) = file_appender(log_dir) {
        subscriber.with_writer(appender).with_ansi(false).init();
        return;
    }

    subscriber.init();
}

/// Initialize the logger for the terminal console
pub fn init_tui_logger(log_level: &str, log_dir: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},hyper=warn,reqwest=warn")));

    let file_layer = file_appender(log_dir).map(|appender| {
        tracing_subscriber::fmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(tui_logger::tracing_subscriber_layer())
        .with(file_layer)
        .with(env_filter)
        .init();

    // log crate adapter for dependencies that do not use tracing
    let level = log_level.parse().unwrap_or(log::LevelFilter::Info);
    tui_logger::init_logger(level).ok();
    tui_logger::set_default_level(level);
}
