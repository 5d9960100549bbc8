//! Timestamped, categorized logger.
//!
//! Every entry is composed as
//! `prefix + "[MM/DD HH:MM]"? + "[LABEL] " + format(values)` and handed to a
//! [`ConsoleSink`] together with the category's colour.
//!
//! # Usage
//!
//! ```
//! use scriptlog_console::{Logger, values};
//! use scriptlog_console::testing::TestConsole;
//!
//! let console = TestConsole::new();
//! let logger = Logger::new(false, false).with_sink(console.sink());
//!
//! let line = logger.info(&values!["loaded %d links", 3]);
//! assert_eq!(line, "[scriptlog] [INFO] loaded 3 links");
//! console.assert_contains("loaded 3 links");
//! ```
//!
//! A `Logger` can also be installed as the global [`log`] backend:
//!
//! ```ignore
//! Logger::from_config(&LoggerConfig::load()).init()?;
//! log::warn!("disk almost full");
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use log::{Level, LevelFilter, Log, Metadata, Record};
use scriptlog_core::{InspectOptions, Value, format, inspect};

use crate::category::{Category, CategoryDescriptor, CategoryTable, categories};
use crate::config::{DEFAULT_PREFIX, LoggerConfig};
use crate::padding::pad_left;
use crate::sink::{ConsoleSink, StreamSink};

/// Categorized console logger.
pub struct Logger {
    prefix: String,
    show_date_time: bool,
    debug_enabled: bool,
    categories: Arc<CategoryTable>,
    sink: Arc<dyn ConsoleSink>,
}

impl Logger {
    /// Create a logger writing to stderr with colour auto-detection.
    #[must_use]
    pub fn new(show_date_time: bool, debug_enabled: bool) -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            show_date_time,
            debug_enabled,
            categories: categories(),
            sink: Arc::new(StreamSink::stderr()),
        }
    }

    /// Create a logger from a [`LoggerConfig`].
    #[must_use]
    pub fn from_config(config: &LoggerConfig) -> Self {
        let sink = StreamSink::stderr_with_colors(config.resolve_colors())
            .with_backtraces(config.backtraces);
        Self::new(config.show_date_time, config.debug_enabled)
            .with_prefix(config.prefix.clone())
            .with_sink(Arc::new(sink))
    }

    /// Send output to `sink` instead of stderr.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn ConsoleSink>) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Use a custom category table.
    #[must_use]
    pub fn with_categories(mut self, table: CategoryTable) -> Self {
        self.categories = Arc::new(table);
        self
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn shows_date_time(&self) -> bool {
        self.show_date_time
    }

    #[must_use]
    pub fn is_debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    // ─────────────────────────────────────────────────
    // Category methods
    // ─────────────────────────────────────────────────

    pub fn log(&self, values: &[Value]) -> String {
        self.log_named(Category::Log.name(), values)
    }

    pub fn info(&self, values: &[Value]) -> String {
        self.log_named(Category::Info.name(), values)
    }

    pub fn warn(&self, values: &[Value]) -> String {
        self.log_named(Category::Warn.name(), values)
    }

    /// Log an error. The first value is rendered with unlimited-depth
    /// inspection before formatting, so nested detail is never elided.
    pub fn error(&self, values: &[Value]) -> String {
        let (first, rest) = match values.split_first() {
            Some((first, rest)) => (first.clone(), rest),
            None => (Value::Undefined, values),
        };
        let mut message = Vec::with_capacity(rest.len() + 1);
        message.push(Value::from(inspect(&first, InspectOptions::new().unlimited())));
        message.extend_from_slice(rest);
        self.log_named(Category::Error.name(), &message)
    }

    /// Log a header line, then a structured dump of `obj`.
    pub fn dir(&self, obj: &Value, message: &[Value]) -> String {
        let line = self.log_named(Category::Dir.name(), message);
        self.sink.dir(obj);
        line
    }

    /// Log a header line, then a stack trace labelled with the same values.
    pub fn trace(&self, values: &[Value]) -> String {
        let line = self.log_named(Category::Trace.name(), values);
        self.sink.trace(values);
        line
    }

    /// Like [`Logger::log`], but only when debug output is enabled.
    pub fn debug(&self, values: &[Value]) -> Option<String> {
        self.debug_enabled
            .then(|| self.log_named(Category::Debug.name(), values))
    }

    // ─────────────────────────────────────────────────
    // Composition
    // ─────────────────────────────────────────────────

    /// Log under a category name, stamped with the current local time.
    /// Unknown names use the fallback category.
    pub fn log_named(&self, category: &str, values: &[Value]) -> String {
        self.log_at(Local::now().naive_local(), category, values)
    }

    /// Compose the line for `date`, emit it, and return it.
    pub fn log_at(&self, date: NaiveDateTime, category: &str, values: &[Value]) -> String {
        let descriptor = self.categories.resolve(category);
        let line = self.compose(date, descriptor, &format(values));
        self.sink.emit(descriptor.method, &line, &descriptor.style());
        line
    }

    fn compose(&self, date: NaiveDateTime, descriptor: &CategoryDescriptor, message: &str) -> String {
        let mut line = self.prefix.clone();
        if self.show_date_time {
            line.push('[');
            line.push_str(&timestamp(date));
            line.push(']');
        }
        line.push('[');
        line.push_str(&descriptor.label);
        line.push_str("] ");
        line.push_str(message);
        line
    }

    // ─────────────────────────────────────────────────
    // Global installation
    // ─────────────────────────────────────────────────

    /// Install as the global `log` backend.
    ///
    /// Returns an error if a logger has already been set.
    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = if self.debug_enabled {
            LevelFilter::Trace
        } else {
            LevelFilter::Info
        };
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    /// Install as the global logger, ignoring errors if already set.
    pub fn try_init(self) {
        let _ = self.init();
    }

    fn category_for(level: Level) -> Category {
        match level {
            Level::Error => Category::Error,
            Level::Warn => Category::Warn,
            Level::Info => Category::Info,
            Level::Debug | Level::Trace => Category::Debug,
        }
    }
}

/// `MM/DD HH:MM`, each field zero-padded to two digits.
#[must_use]
pub fn timestamp(date: NaiveDateTime) -> String {
    format!(
        "{}/{} {}:{}",
        pad_left(date.month(), 2, "0"),
        pad_left(date.day(), 2, "0"),
        pad_left(date.hour(), 2, "0"),
        pad_left(date.minute(), 2, "0"),
    )
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("prefix", &self.prefix)
            .field("show_date_time", &self.show_date_time)
            .field("debug_enabled", &self.debug_enabled)
            .finish_non_exhaustive()
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info || self.debug_enabled
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Records are already formatted; keep `%` sequences literal.
        let descriptor = self.categories.get(Self::category_for(record.level()));
        let line = self.compose(
            Local::now().naive_local(),
            descriptor,
            &record.args().to_string(),
        );
        self.sink.emit(descriptor.method, &line, &descriptor.style());
    }

    fn flush(&self) {}
}
