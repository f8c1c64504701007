//! Tracing initialization.
//! Builds a subscriber with EnvFilter, supports compact or JSON formats, and optional file logging.
//!
//! Behavior:
//! - Log level is driven by LogLevel (no RUST_LOG override here).
//! - JSON/non-JSON formatting is selected via the `json` flag.
//! - If `log_file` is provided and can be opened, a non-blocking file layer is added.

use anyhow::Result;
use chrono::Local;
use pano_select::LogLevel;
use pano_select::output as out;
use std::fmt as stdfmt;
use std::fs::OpenOptions;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::util::SubscriberInitExt;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

#[inline]
fn to_level_filter(lvl: &LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

/// Filter on our own crate only; dependencies stay at warn.
fn env_filter_for(level_filter: LevelFilter) -> EnvFilter {
    let level = level_filter
        .into_level()
        .map(|l| l.as_str().to_ascii_lowercase())
        .unwrap_or_else(|| "off".into());
    EnvFilter::new(format!("warn,pano_select={level}"))
}

/// Open the log file for appending and wrap it in a non-blocking writer.
fn open_non_blocking_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            out::print_warn(&format!(
                "Failed to open log file {}: {e}; logs will continue to stdout.",
                path.display()
            ));
            None
        }
    }
}

/// Initialize tracing. Returns the WorkerGuard of the file appender when one is
/// created; it must be held until shutdown so buffered lines get written.
pub fn init_tracing(
    lvl: &LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let env_filter = env_filter_for(to_level_filter(lvl));
    let file = log_file.and_then(open_non_blocking_writer);

    match (file, json) {
        (Some((writer, guard)), true) => {
            let stdout_layer = tsfmt::layer()
                .event_format(tsfmt::format().json())
                .with_timer(LocalHumanTime)
                .with_target(true);
            let file_layer = tsfmt::layer()
                .event_format(tsfmt::format().json())
                .with_timer(LocalHumanTime)
                .with_target(true)
                .with_writer(writer);
            registry().with(env_filter).with(stdout_layer).with(file_layer).try_init()?;
            Ok(Some(guard))
        }
        (Some((writer, guard)), false) => {
            let stdout_layer = tsfmt::layer()
                .with_timer(LocalHumanTime)
                .with_target(false)
                .compact();
            let file_layer = tsfmt::layer()
                .with_timer(LocalHumanTime)
                .with_target(true)
                .with_ansi(false)
                .compact()
                .with_writer(writer);
            registry().with(env_filter).with(stdout_layer).with(file_layer).try_init()?;
            Ok(Some(guard))
        }
        (None, true) => {
            let stdout_layer = tsfmt::layer()
                .event_format(tsfmt::format().json())
                .with_timer(LocalHumanTime)
                .with_target(true);
            registry().with(env_filter).with(stdout_layer).try_init()?;
            Ok(None)
        }
        (None, false) => {
            let stdout_layer = tsfmt::layer()
                .with_timer(LocalHumanTime)
                .with_target(false)
                .compact();
            registry().with(env_filter).with(stdout_layer).try_init()?;
            Ok(None)
        }
    }
}
