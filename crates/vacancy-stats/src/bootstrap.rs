use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Root of the per-user state directory, `~/.vacancy-stats/`.
pub fn state_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".vacancy-stats")
}

/// Where reports go when `--report-dir` is not given.
pub fn default_report_dir() -> PathBuf {
    state_dir().join("reports")
}

/// Create `~/.vacancy-stats/` and its `reports/` subdirectory if absent.
pub fn ensure_directories() -> anyhow::Result<()> {
    std::fs::create_dir_all(default_report_dir())?;
    Ok(())
}

/// The report directory to use: `explicit` if given, otherwise the default
/// one under the state directory.
pub fn resolve_report_dir(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(default_report_dir)
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name onto an [`EnvFilter`] directive.
///
/// `CRITICAL` has no tracing counterpart and maps to `error`.
pub fn filter_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        other => other.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber writing to stderr.
///
/// Falls back to `info` if the directive does not parse.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(filter).with(layer).try_init()?;

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
