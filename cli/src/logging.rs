//! Logging configuration with file-based output and size-based rotation.
//!
//! Writes logs to `~/.config/mapquiz/mapquiz.log` (or platform equivalent)
//! with 10 MB size-based rotation. Stdout belongs to the REPL, so nothing is
//! logged there. `RUST_LOG` overrides the filter; otherwise set
//! `DEBUG_LOGGING=1` to enable debug output for mapquiz crates.

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEBUG_DIRECTIVE: &str = "info,mapquiz_core=debug,mapquiz_render=debug,mapquiz_cli=debug";

/// Initialize file logging.
///
/// Returns a `WorkerGuard` that must be held for the application lifetime
/// so buffered logs are flushed on shutdown. Falls back to warnings on
/// stderr and returns `None` if the log file cannot be created.
pub fn init() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let Some(log_dir) = dirs::config_dir().map(|config| config.join("mapquiz")) else {
        init_stderr_only();
        return None;
    };

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        // Subscriber not initialized yet
        eprintln!(
            "Failed to create log directory {:?}: {}, logging warnings to stderr",
            log_dir, e
        );
        init_stderr_only();
        return None;
    }

    // 10 MB, keep mapquiz.log and mapquiz.log.1
    let log_path = log_dir.join("mapquiz.log");
    let file_appender = match BasicRollingFileAppender::new(
        &log_path,
        RollingConditionBasic::new().max_size(10 * 1024 * 1024),
        1,
    ) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to create log file at {:?}: {}", log_path, e);
            init_stderr_only();
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), debug_logging);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(filter)
        .init();

    tracing::info!(log_file = ?log_path, debug_logging, "Logging initialized");

    Some(guard)
}

/// `RUST_LOG` directives when set and valid, else the built-in default
fn build_filter(rust_log: Option<&str>, debug_logging: bool) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(if debug_logging { DEBUG_DIRECTIVE } else { "info" }))
}

/// Fallback: warnings and errors only, on stderr.
fn init_stderr_only() {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(EnvFilter::new("warn"))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_overrides_default() {
        let filter = build_filter(Some("mapquiz_core=trace"), true);
        assert_eq!(filter.to_string(), "mapquiz_core=trace");
    }

    #[test]
    fn test_default_filters() {
        assert_eq!(build_filter(None, false).to_string(), "info");
        assert!(build_filter(None, true).to_string().contains("mapquiz_cli=debug"));
    }

    #[test]
    fn test_invalid_rust_log_falls_back() {
        assert_eq!(build_filter(Some("mapquiz_core=notalevel"), false).to_string(), "info");
    }
}
