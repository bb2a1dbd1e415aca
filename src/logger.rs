//! Leveled console logging
//!
//! A `Logger` is an explicit capability object: a severity threshold plus a
//! sink. Components receive a `&Logger` from their caller; programs that
//! want ambient logging use the [`global`] adapter at their entry point.
//!
//! Output is one line per call, colorized by severity (error red, warn
//! yellow, debug green, info uncolored). No buffering, no structured
//! fields.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::OnceLock;

use colored::Colorize;
use parking_lot::{Mutex, RwLock};

use crate::errors::PihostError;

/// Severity threshold. Each emission call fires only when the configured
/// level is strictly greater than the predecessor of its own severity,
/// matching the behavior this crate replaces bit-for-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    None = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
}

impl FromStr for LogLevel {
    type Err = PihostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(LogLevel::None),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(PihostError::validation(format!(
                "unknown log level: {}",
                other
            ))),
        }
    }
}

pub struct Logger {
    level: RwLock<LogLevel>,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Logger {
    /// Logger writing to standard output
    pub fn new(level: LogLevel) -> Self {
        Self::with_sink(level, Box::new(io::stdout()))
    }

    pub fn with_sink(level: LogLevel, sink: Box<dyn Write + Send>) -> Self {
        Logger {
            level: RwLock::new(level),
            sink: Mutex::new(sink),
        }
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    /// Expected to be called once, at startup, before logging begins
    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    /// Emits at level > None, painted red
    pub fn error(&self, args: fmt::Arguments<'_>) {
        if self.level() > LogLevel::None {
            self.write_line(format!("{}", args).red().to_string());
        }
    }

    /// Emits at level > Error, painted yellow
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        if self.level() > LogLevel::Error {
            self.write_line(format!("{}", args).yellow().to_string());
        }
    }

    /// Emits at level > Warn, uncolored
    pub fn info(&self, args: fmt::Arguments<'_>) {
        if self.level() > LogLevel::Warn {
            self.write_line(format!("{}", args));
        }
    }

    /// Emits at level > Info, painted green
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        if self.level() > LogLevel::Info {
            self.write_line(format!("{}", args).green().to_string());
        }
    }

    fn write_line(&self, line: String) {
        let mut sink = self.sink.lock();
        let _ = writeln!(sink, "{}", line);
        let _ = sink.flush();
    }
}

/// `logger.error(...)` with `format!` syntax
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(format_args!($($arg)*))
    };
}

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Process-wide logger writing to standard output.
///
/// The starting level comes from `PIHOST_LOG_LEVEL` on first use
/// (default: `error`); adjust later with [`set_level`].
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(|| {
        let level = std::env::var("PIHOST_LOG_LEVEL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(LogLevel::Error);
        Logger::new(level)
    })
}

/// Adjust the global logger's threshold
pub fn set_level(level: LogLevel) {
    global().set_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex as StdMutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<StdMutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
        }
    }

    #[test]
    fn error_level_suppresses_warn_and_below() {
        let buf = SharedBuf::default();
        let logger = Logger::with_sink(LogLevel::Error, Box::new(buf.clone()));

        log_error!(logger, "boom");
        log_warn!(logger, "careful");
        log_info!(logger, "fyi");
        log_debug!(logger, "trace");

        let out = buf.contents();
        assert!(out.contains("boom"));
        assert!(!out.contains("careful"));
        assert!(!out.contains("fyi"));
        assert!(!out.contains("trace"));
    }

    #[test]
    fn set_level_opens_lower_severities() {
        let buf = SharedBuf::default();
        let logger = Logger::with_sink(LogLevel::Error, Box::new(buf.clone()));

        logger.set_level(LogLevel::Debug);
        log_debug!(logger, "trace me");

        assert!(buf.contents().contains("trace me"));
    }

    #[test]
    fn level_none_silences_everything() {
        let buf = SharedBuf::default();
        let logger = Logger::with_sink(LogLevel::None, Box::new(buf.clone()));

        log_error!(logger, "boom");

        assert!(buf.contents().is_empty());
    }

    #[test]
    fn message_arguments_are_formatted() {
        let buf = SharedBuf::default();
        let logger = Logger::with_sink(LogLevel::Debug, Box::new(buf.clone()));

        log_info!(logger, "serial is {}, attempt {}", "0000000031a2b3c4", 1);

        assert!(
            buf.contents()
                .contains("serial is 0000000031a2b3c4, attempt 1")
        );
    }

    #[test]
    fn parse_level_strings() {
        assert_eq!("error".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("off".parse::<LogLevel>().unwrap(), LogLevel::None);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn levels_are_ordered() {
        assert!(LogLevel::None < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
    }
}
