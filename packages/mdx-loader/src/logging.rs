// Logging
//
// Logger trait and the console/null implementations used by the loader.

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

/// Logger trait.
pub trait Logger: Send + Sync {
    fn level(&self) -> LogLevel;
    fn debug(&self, msg: &str);
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }
}

/// Where a [`ConsoleLogger`] sends info messages. Debug, warn and error
/// always go to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoStream {
    Stdout,
    Stderr,
}

/// Console logger.
pub struct ConsoleLogger {
    level: LogLevel,
    info_stream: InfoStream,
}

impl ConsoleLogger {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            info_stream: InfoStream::Stdout,
        }
    }

    /// Logger that leaves stdout to the program's own output.
    pub fn to_stderr(level: LogLevel) -> Self {
        Self {
            level,
            info_stream: InfoStream::Stderr,
        }
    }

    pub fn info_stream(&self) -> InfoStream {
        self.info_stream
    }
}

impl Logger for ConsoleLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn debug(&self, msg: &str) {
        if self.is_enabled(LogLevel::Debug) {
            eprintln!("[DEBUG] {}", msg);
        }
    }

    fn info(&self, msg: &str) {
        if self.is_enabled(LogLevel::Info) {
            match self.info_stream {
                InfoStream::Stdout => println!("[INFO] {}", msg),
                InfoStream::Stderr => eprintln!("[INFO] {}", msg),
            }
        }
    }

    fn warn(&self, msg: &str) {
        if self.is_enabled(LogLevel::Warn) {
            eprintln!("[WARN] {}", msg);
        }
    }

    fn error(&self, msg: &str) {
        if self.is_enabled(LogLevel::Error) {
            eprintln!("[ERROR] {}", msg);
        }
    }
}

/// Null logger (logs nothing).
pub struct NullLogger;

impl NullLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for NullLogger {
    fn level(&self) -> LogLevel {
        LogLevel::Error
    }
    fn debug(&self, _msg: &str) {}
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_order_levels() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn should_check_level_enabled() {
        let logger = ConsoleLogger::new(LogLevel::Warn);
        assert!(!logger.is_enabled(LogLevel::Debug));
        assert!(!logger.is_enabled(LogLevel::Info));
        assert!(logger.is_enabled(LogLevel::Warn));
        assert!(logger.is_enabled(LogLevel::Error));
    }

    #[test]
    fn should_pick_info_stream() {
        assert_eq!(ConsoleLogger::new(LogLevel::Info).info_stream(), InfoStream::Stdout);
        let logger = ConsoleLogger::to_stderr(LogLevel::Debug);
        assert_eq!(logger.info_stream(), InfoStream::Stderr);
        assert_eq!(logger.level(), LogLevel::Debug);
    }

    #[test]
    fn null_logger_should_only_report_errors_level() {
        let logger = NullLogger::new();
        assert_eq!(logger.level(), LogLevel::Error);
        logger.warn("dropped");
    }
}
