use std::fmt::Display;
use std::io::Write;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use parking_lot::Mutex;

struct ScriptreeLogger {
    file: Option<Mutex<std::fs::File>>,
    filter: LevelFilter,
    start: Instant,
}

fn format_line(elapsed: f64, level: Level, target: &str, message: impl Display) -> String {
    format!("[{elapsed:.3}s] [{level}] {target} - {message}")
}

impl Log for ScriptreeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.start.elapsed().as_secs_f64();
        let line = format_line(elapsed, record.level(), record.target(), record.args());
        let _ = writeln!(std::io::stderr().lock(), "{line}");

        if let Some(ref file) = self.file {
            let _ = writeln!(file.lock(), "{line}");
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
        if let Some(ref file) = self.file {
            let _ = file.lock().flush();
        }
    }
}

/// Level from `RUST_LOG` when it parses, `default` otherwise
fn level_from_env(value: Option<&str>, default: LevelFilter) -> LevelFilter {
    value.and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// Initialize the global logger. Log lines go to stderr and, if given, `log_file`.
///
/// # Errors
///
/// Returns `SetLoggerError` if a logger was already installed.
pub fn init(default: LevelFilter, log_file: Option<std::fs::File>) -> Result<(), SetLoggerError> {
    let filter = level_from_env(std::env::var("RUST_LOG").ok().as_deref(), default);

    let logger = ScriptreeLogger {
        file: log_file.map(Mutex::new),
        filter,
        start: Instant::now(),
    };

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(filter);
    Ok(())
}
