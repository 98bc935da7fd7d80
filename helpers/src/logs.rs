//! Console diagnostics for the helper commands.
//!
//! Every command reports through a [`Logger`] passed in by the caller. The
//! logger prints each entry and keeps a copy, so the same run can be checked
//! from tests without capturing stdout.

use serde::{Deserialize, Serialize};

/// Log level for console display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Optional indentation level (for nested logs)
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Console rendering of the entry.
    pub fn render(&self) -> String {
        let prefix = match self.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        let indent = "   ".repeat(self.indent as usize);
        format!("{}{} {}", indent, prefix, self.message)
    }
}

/// Console stream an entry is printed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Prints entries to the console and records them.
#[derive(Debug, Default)]
pub struct Logger {
    entries: Vec<LogEntry>,
    silent: bool,
    errors_on_stdout: bool,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A logger that records entries without printing them.
    pub fn silent() -> Self {
        Self { silent: true, ..Self::default() }
    }

    /// Print errors on stdout too, for commands whose whole report goes there.
    pub fn errors_on_stdout(mut self) -> Self {
        self.errors_on_stdout = true;
        self
    }

    /// Stream used for entries at `level`. Errors go to stderr unless
    /// [`Logger::errors_on_stdout`] was set; everything else goes to stdout.
    pub fn stream_for(&self, level: LogLevel) -> Stream {
        match level {
            LogLevel::Error if !self.errors_on_stdout => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }

    /// Print and record an entry.
    pub fn log(&mut self, entry: LogEntry) {
        if !self.silent {
            match self.stream_for(entry.level) {
                Stream::Stderr => eprintln!("{}", entry.render()),
                Stream::Stdout => println!("{}", entry.render()),
            }
        }
        self.entries.push(entry);
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::info(msg));
    }

    pub fn success(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::success(msg));
    }

    pub fn warning(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::warning(msg));
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::error(msg));
    }

    /// Everything logged so far, in order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries at the given level.
    pub fn at_level(&self, level: LogLevel) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.level == level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prefixes() {
        assert_eq!(LogEntry::info("reading").render(), "    reading");
        assert_eq!(LogEntry::success("done").render(), "   ✓ done");
        assert_eq!(LogEntry::error("boom").with_indent(1).render(), "      ❌ boom");
    }

    #[test]
    fn test_silent_logger_records() {
        let mut logger = Logger::silent();
        logger.info("one");
        logger.warning("two");
        logger.warning("three");

        assert_eq!(logger.entries().len(), 3);
        assert_eq!(logger.at_level(LogLevel::Warning).count(), 2);
        assert_eq!(logger.entries()[0].message, "one");
    }

    #[test]
    fn test_error_stream() {
        let logger = Logger::silent();
        assert_eq!(logger.stream_for(LogLevel::Error), Stream::Stderr);
        assert_eq!(logger.stream_for(LogLevel::Warning), Stream::Stdout);

        let logger = Logger::silent().errors_on_stdout();
        assert_eq!(logger.stream_for(LogLevel::Error), Stream::Stdout);
        assert_eq!(logger.stream_for(LogLevel::Info), Stream::Stdout);
    }

    #[test]
    fn test_level_serializes_lowercase() {
        let json = serde_json::to_string(&LogEntry::warning("x")).unwrap();
        assert!(json.contains("\"level\":\"warning\""));
    }
}
