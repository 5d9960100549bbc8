//! Console sinks: where composed log lines end up.

use std::backtrace::Backtrace;
use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;

use scriptlog_core::{AnsiColor, InspectOptions, Value, format, inspect};

/// Console entry point a category writes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleMethod {
    Log,
    Info,
    Warn,
    Error,
}

impl ConsoleMethod {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ConsoleMethod::Log => "log",
            ConsoleMethod::Info => "info",
            ConsoleMethod::Warn => "warn",
            ConsoleMethod::Error => "error",
        }
    }
}

/// Colour instruction sent alongside a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDirective {
    color: String,
}

impl StyleDirective {
    #[must_use]
    pub fn color(name: impl Into<String>) -> Self {
        Self { color: name.into() }
    }

    #[must_use]
    pub fn color_name(&self) -> &str {
        &self.color
    }

    /// The directive as a CSS declaration, e.g. `color: cyan`.
    #[must_use]
    pub fn css(&self) -> String {
        format!("color: {}", self.color)
    }

    /// Terminal equivalent, if the colour is in the ANSI table.
    #[must_use]
    pub fn ansi(&self) -> Option<AnsiColor> {
        AnsiColor::from_name(&self.color)
    }

    /// Wrap `text` in the terminal colour, or return it as is.
    #[must_use]
    pub fn paint(&self, text: &str) -> String {
        match self.ansi() {
            Some(color) => color.paint(text),
            None => text.to_string(),
        }
    }
}

impl fmt::Display for StyleDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}

/// Destination for logger output.
///
/// Implementations must not fail the caller: a sink that cannot write drops
/// the output.
pub trait ConsoleSink: Send + Sync {
    /// Write one composed line through `method`, styled per `style`.
    fn emit(&self, method: ConsoleMethod, line: &str, style: &StyleDirective);

    /// Structured display of a single value.
    fn dir(&self, value: &Value);

    /// Stack-trace dump labelled with `values`.
    fn trace(&self, values: &[Value]);
}

/// Sink writing to stderr or any other byte stream.
pub struct StreamSink {
    writer: Mutex<Box<dyn Write + Send>>,
    colors: bool,
    backtraces: bool,
}

impl StreamSink {
    /// Stderr with colour auto-detection.
    #[must_use]
    pub fn stderr() -> Self {
        Self::stderr_with_colors(crate::detection::should_enable_color())
    }

    #[must_use]
    pub fn stderr_with_colors(colors: bool) -> Self {
        Self::with_writer(io::stderr(), colors)
    }

    /// Create with custom writer (for testing)
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(writer: W, colors: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            colors,
            backtraces: true,
        }
    }

    /// Whether `trace` appends a captured backtrace.
    #[must_use]
    pub fn with_backtraces(mut self, enabled: bool) -> Self {
        self.backtraces = enabled;
        self
    }

    #[must_use]
    pub fn is_colored(&self) -> bool {
        self.colors
    }

    fn write_line(&self, text: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let mut buf = String::with_capacity(text.len() + 1);
            buf.push_str(text);
            buf.push('\n');
            let _ = writer.write_all(buf.as_bytes());
            let _ = writer.flush();
        }
    }
}

impl fmt::Debug for StreamSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSink")
            .field("colors", &self.colors)
            .field("backtraces", &self.backtraces)
            .finish_non_exhaustive()
    }
}

impl ConsoleSink for StreamSink {
    fn emit(&self, _method: ConsoleMethod, line: &str, style: &StyleDirective) {
        if self.colors {
            self.write_line(&style.paint(line));
        } else {
            self.write_line(line);
        }
    }

    fn dir(&self, value: &Value) {
        self.write_line(&inspect(value, InspectOptions::new().colors(self.colors)));
    }

    fn trace(&self, values: &[Value]) {
        let mut text = if values.is_empty() {
            "Trace".to_string()
        } else {
            format!("Trace: {}", format(values))
        };
        if self.backtraces {
            text.push('\n');
            text.push_str(Backtrace::force_capture().to_string().trim_end());
        }
        self.write_line(&text);
    }
}
