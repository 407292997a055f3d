use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::str::FromStr;

/// Colored stderr logger. Only `cyclo_*` targets pass below `Warn`.
struct CliLogger;

static LOGGER: CliLogger = CliLogger;

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn || metadata.target().starts_with("cyclo")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".blue().bold(),
            Level::Debug => "DEBUG".dimmed(),
            Level::Trace => "TRACE".dimmed(),
        };
        eprintln!("{} {} {}", tag, record.target().dimmed(), record.args());
    }

    fn flush(&self) {}
}

/// `-v` count wins; otherwise `CYCLO_LOG` (e.g. "debug"); default `warn`.
pub fn level_for(verbose: u8, env: Option<&str>) -> LevelFilter {
    match verbose {
        0 => env
            .and_then(|v| LevelFilter::from_str(v.trim()).ok())
            .unwrap_or(LevelFilter::Warn),
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init(verbose: u8) {
    let env = std::env::var("CYCLO_LOG").ok();
    let level = level_for(verbose, env.as_deref());
    // A second init (tests) keeps the first logger.
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
