use env_logger::{Builder, Target};
use log::{Level, LevelFilter, SetLoggerError};
use std::env;
use std::io::Write;

use crate::error::AppError;
use crate::models::RecordKind;
use crate::validation::ValidationError;

fn parse_level(value: &str) -> LevelFilter {
    match value.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

pub fn init_logging() -> Result<(), SetLoggerError> {
    let log_level = parse_level(&env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()));

    let mut builder = Builder::from_default_env();

    builder.format(|buf, record| {
        let timestamp = buf.timestamp();
        let target = record.target();
        match record.level() {
            Level::Info => writeln!(buf, "{} [INFO] [{}]: {}", timestamp, target, record.args()),
            level => writeln!(
                buf,
                "{} [{}] [{}:{}] {}: {}",
                timestamp,
                level,
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                target,
                record.args()
            ),
        }
    });

    // Filter out noisy modules in production
    if env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string()) == "production" {
        builder.filter_module("reqwest", LevelFilter::Warn);
        builder.filter_module("hyper", LevelFilter::Warn);
        builder.filter_module("hyper_util", LevelFilter::Warn);
        builder.filter_module("tower_http", LevelFilter::Warn);
    }

    builder.filter_level(log_level).target(Target::Stdout).try_init()
}

pub fn log_error_with_context(error: &anyhow::Error, context: &str) {
    log::error!("[{}] {}", context, error);

    for cause in error.chain().skip(1) {
        log::error!("  Caused by: {}", cause);
    }
}

/// Backend and transport errors may echo record contents, so warn output
/// gets the status-line text for those and the full error goes to debug.
fn failure_summary(error: &AppError) -> String {
    if error.is_pii_safe() {
        error.to_string()
    } else {
        error.to_safe_string()
    }
}

pub fn log_gateway_failure(operation: &str, kind: RecordKind, error: &AppError) {
    log::warn!(
        "[Gateway] {} {} failed: {}",
        operation,
        kind.segment(),
        failure_summary(error)
    );
    if !error.is_pii_safe() {
        log::debug!("[Gateway] {} {} error detail: {}", operation, kind.segment(), error);
    }
}

pub fn log_validation_rejected(kind: RecordKind, error: &ValidationError) {
    log::info!("[Store] {} draft rejected: {}", kind.label(), error);
}
