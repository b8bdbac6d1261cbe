//! A `log` backend for the binaries.
//!
//! The library only talks to the `log` facade. Binaries call [`init`] once
//! and get coloured records on stderr.

use std::io::Write;
use std::sync::OnceLock;

use log::Level;
use log::LevelFilter;
use log::Log;
use log::Metadata;
use log::Record;
use owo_colors::OwoColorize;

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Maps the number of `-v` flags to a level filter.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the stderr logger.
///
/// Fails if some other logger was installed first.
pub fn init(max_level: LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_logger(LOGGER.get_or_init(|| StderrLogger { max_level }))?;
    log::set_max_level(max_level);
    Ok(())
}

#[derive(Debug)]
pub struct StderrLogger {
    max_level: LevelFilter,
}

impl StderrLogger {
    fn tag(level: Level) -> String {
        match level {
            Level::Error => "ERROR".red().bold().to_string(),
            Level::Warn => " WARN".yellow().to_string(),
            Level::Info => " INFO".green().to_string(),
            Level::Debug => "DEBUG".blue().to_string(),
            Level::Trace => "TRACE".dimmed().to_string(),
        }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let source = record.module_path().unwrap_or("unknown");
        let mut err = anstream::stderr();
        // Nowhere left to report a failed write to stderr.
        let _ = writeln!(
            err,
            "{} {} {}",
            Self::tag(record.level()),
            source.dimmed(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = anstream::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for_verbosity(0), LevelFilter::Warn);
        assert_eq!(level_for_verbosity(2), LevelFilter::Debug);
        assert_eq!(level_for_verbosity(9), LevelFilter::Trace);
    }

    #[test]
    fn filters_by_level() {
        let logger = StderrLogger {
            max_level: LevelFilter::Info,
        };
        assert!(logger.enabled(&Metadata::builder().level(Level::Warn).build()));
        assert!(!logger.enabled(&Metadata::builder().level(Level::Debug).build()));
    }

    #[test]
    fn second_install_is_an_error() {
        // Some other test may have installed it already.
        let _ = init(LevelFilter::Warn);

        let err: Box<dyn std::error::Error> = init(LevelFilter::Warn).unwrap_err().into();
        assert!(!err.to_string().is_empty());
    }
}
