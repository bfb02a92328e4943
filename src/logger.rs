// src/logger.rs
use std::{io, path::Path, sync::OnceLock};
use tracing_subscriber::{EnvFilter, fmt};

static GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
static INIT: OnceLock<()> = OnceLock::new();

/// Initialize file logging once for the whole process.
/// - `path`: e.g., "logs/ox88.log"
/// - `filter`: e.g., "ox88::search=info,ox88::moves::perft=debug"
///
/// `RUST_LOG`, when set, takes precedence over `filter`. Later calls are no-ops.
pub fn init_logging<P: AsRef<Path>>(path: P, filter: &str) -> io::Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }
    let path = path.as_ref();

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    // Keep the guard alive for the program lifetime
    let _ = GUARD.set(guard);

    let env_filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_ansi(false) // plain text in files
        .with_target(true)
        .with_line_number(true)
        .with_writer(non_blocking)
        .finish();

    // Someone else may already own the global subscriber (tests); that is fine
    let _ = tracing::subscriber::set_global_default(subscriber);
    let _ = INIT.set(());
    Ok(())
}
