//! File-based logging module for movie-search
//!
//! This module sets up tracing-based logging that writes to a file instead of stdout,
//! since the application uses a TUI that occupies the terminal.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_DIR: &str = ".logs";
const LOG_FILE_PREFIX: &str = "movie-search";
const DEFAULT_FILTER: &str = "movie_search=debug,reqwest=info,warn";

/// Initialize the logging system.
///
/// Logs are written to `.logs/movie-search.YYYY-MM-DD.log` with daily rotation.
/// The log level can be controlled via the `RUST_LOG` environment variable.
///
/// The returned guard flushes buffered records when dropped, so keep it alive
/// until the application exits.
pub fn init_logging() -> anyhow::Result<WorkerGuard> {
    let log_dir = Path::new(LOG_DIR);
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, LOG_FILE_PREFIX);

    // Non-blocking writer so log I/O never stalls the event loop
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI colors in log files
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("Logging initialized - logs written to {}/", LOG_DIR);

    Ok(guard)
}

/// Trace the start of a search call; evaluates to an `Instant` for [`log_search_result!`]
#[macro_export]
macro_rules! log_search_request {
    ($query:expr, $page:expr) => {{
        tracing::debug!(query = %$query, page = $page, "Search request started");
        std::time::Instant::now()
    }};
}

/// Trace how a search call ended: item count on success, error otherwise
#[macro_export]
macro_rules! log_search_result {
    ($started:expr, $query:expr, $page:expr, $result:expr) => {
        match &$result {
            Ok(results) => tracing::info!(
                query = %$query,
                page = $page,
                items = results.items.len(),
                total_pages = results.total_pages,
                elapsed_ms = $started.elapsed().as_millis() as u64,
                "Search request succeeded"
            ),
            Err(e) => tracing::warn!(
                query = %$query,
                page = $page,
                elapsed_ms = $started.elapsed().as_millis() as u64,
                error = %e,
                "Search request failed"
            ),
        }
    };
}
