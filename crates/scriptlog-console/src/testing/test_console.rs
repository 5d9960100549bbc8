//! TestConsole for capturing output in tests
//!
//! Provides a sink that records every call and captures the written text
//! for assertion instead of writing to stderr.

use std::io::Write;
use std::sync::{Arc, Mutex};

use scriptlog_core::{InspectOptions, Value, format, inspect};
use strip_ansi_escapes::strip;

use crate::sink::{ConsoleMethod, ConsoleSink, StreamSink, StyleDirective};

/// Which sink operation produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Emit(ConsoleMethod),
    Dir,
    Trace,
}

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEntry {
    pub kind: EntryKind,
    /// The line for `emit`, the plain inspection for `dir`, the formatted
    /// label for `trace`.
    pub text: String,
    /// Style directive (only set for `emit`)
    pub style: Option<StyleDirective>,
}

/// A sink that captures output for testing
///
/// Writes go through a [`StreamSink`] backed by an in-memory buffer, so the
/// captured text is exactly what stderr would have received (backtraces
/// excluded). Pass `sink()` to a [`crate::Logger`], then use `output()`,
/// `contains()`, and the assertion methods to verify what was logged.
pub struct TestConsole {
    inner: Arc<StreamSink>,
    buffer: Arc<Mutex<TestBuffer>>,
    entries: Arc<Mutex<Vec<CapturedEntry>>>,
    /// Whether the inner sink writes ANSI colour
    report_as_rich: bool,
}

#[derive(Debug, Default)]
struct TestBuffer {
    /// Lines with ANSI codes stripped
    lines: Vec<String>,
    /// Lines with ANSI codes preserved
    raw_lines: Vec<String>,
}

impl TestConsole {
    /// Create a test console that captures plain output
    #[must_use]
    pub fn new() -> Self {
        Self::new_inner(false)
    }

    /// Create a test console whose sink writes ANSI colour
    ///
    /// `output()` still strips the codes; use `raw_output()` to see them.
    #[must_use]
    pub fn new_rich() -> Self {
        Self::new_inner(true)
    }

    fn new_inner(report_as_rich: bool) -> Self {
        let buffer = Arc::new(Mutex::new(TestBuffer::default()));
        let writer = BufferWriter(buffer.clone());

        Self {
            inner: Arc::new(StreamSink::with_writer(writer, report_as_rich).with_backtraces(false)),
            buffer,
            entries: Arc::new(Mutex::new(Vec::new())),
            report_as_rich,
        }
    }

    /// A handle to pass to [`crate::Logger::with_sink`]
    #[must_use]
    pub fn sink(&self) -> Arc<dyn ConsoleSink> {
        Arc::new(self.clone())
    }

    /// All recorded sink calls, oldest first
    #[must_use]
    pub fn entries(&self) -> Vec<CapturedEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }

    /// Get all captured output (ANSI codes stripped)
    #[must_use]
    pub fn output(&self) -> Vec<String> {
        self.buffer
            .lock()
            .map(|b| b.lines.clone())
            .unwrap_or_default()
    }

    /// Get all captured output (with ANSI codes)
    #[must_use]
    pub fn raw_output(&self) -> Vec<String> {
        self.buffer
            .lock()
            .map(|b| b.raw_lines.clone())
            .unwrap_or_default()
    }

    /// Get output as a single string
    #[must_use]
    pub fn output_string(&self) -> String {
        self.output().join("\n")
    }

    /// Check if output contains a string (case-insensitive)
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        let output = self.output_string().to_lowercase();
        output.contains(&needle.to_lowercase())
    }

    /// Check if output contains all of the given strings
    #[must_use]
    pub fn contains_all(&self, needles: &[&str]) -> bool {
        needles.iter().all(|n| self.contains(n))
    }

    /// Check if output matches a regex pattern
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        match regex::Regex::new(pattern) {
            Ok(re) => re.is_match(&self.output_string()),
            Err(_) => false,
        }
    }

    /// Assert that output contains a string
    ///
    /// # Panics
    ///
    /// Panics if the output does not contain the needle string.
    pub fn assert_contains(&self, needle: &str) {
        assert!(
            self.contains(needle),
            "Output did not contain '{}'. Actual output:\n{}",
            needle,
            self.output_string()
        );
    }

    /// Assert that output does NOT contain a string
    ///
    /// # Panics
    ///
    /// Panics if the output contains the needle string.
    pub fn assert_not_contains(&self, needle: &str) {
        assert!(
            !self.contains(needle),
            "Output unexpectedly contained '{}'. Actual output:\n{}",
            needle,
            self.output_string()
        );
    }

    /// Assert output has specific number of lines
    ///
    /// # Panics
    ///
    /// Panics if the line count doesn't match expected.
    pub fn assert_line_count(&self, expected: usize) {
        let actual = self.output().len();
        assert_eq!(
            actual, expected,
            "Expected {} lines but got {}. Actual output:\n{}",
            expected, actual, self.output_string()
        );
    }

    /// Assert the sink was called a specific number of times
    ///
    /// # Panics
    ///
    /// Panics if the entry count doesn't match expected.
    pub fn assert_entry_count(&self, expected: usize) {
        let actual = self.entry_count();
        assert_eq!(
            actual, expected,
            "Expected {} entries but got {}. Actual output:\n{}",
            expected, actual, self.output_string()
        );
    }

    /// Clear captured output and entries
    pub fn clear(&self) {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.lines.clear();
            buf.raw_lines.clear();
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    /// Print output for debugging (in tests)
    pub fn debug_print(&self) {
        eprintln!("=== TestConsole Output ===");
        for (i, line) in self.output().iter().enumerate() {
            eprintln!("{:3}: {}", i + 1, line);
        }
        eprintln!("==========================");
    }

    /// Whether the inner sink writes colour
    #[must_use]
    pub fn is_rich(&self) -> bool {
        self.report_as_rich
    }

    fn record(&self, kind: EntryKind, text: String, style: Option<StyleDirective>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(CapturedEntry { kind, text, style });
        }
    }
}

impl ConsoleSink for TestConsole {
    fn emit(&self, method: ConsoleMethod, line: &str, style: &StyleDirective) {
        self.record(EntryKind::Emit(method), line.to_string(), Some(style.clone()));
        self.inner.emit(method, line, style);
    }

    fn dir(&self, value: &Value) {
        self.record(EntryKind::Dir, inspect(value, InspectOptions::new()), None);
        self.inner.dir(value);
    }

    fn trace(&self, values: &[Value]) {
        self.record(EntryKind::Trace, format(values), None);
        self.inner.trace(values);
    }
}

impl Default for TestConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TestConsole {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            buffer: self.buffer.clone(),
            entries: self.entries.clone(),
            report_as_rich: self.report_as_rich,
        }
    }
}

impl std::fmt::Debug for TestConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestConsole")
            .field("is_rich", &self.is_rich())
            .field("entry_count", &self.entry_count())
            .field("line_count", &self.output().len())
            .finish()
    }
}

/// Writer that captures to a buffer
struct BufferWriter(Arc<Mutex<TestBuffer>>);

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let s = String::from_utf8_lossy(buf);

        if let Ok(mut buffer) = self.0.lock() {
            // Store raw (with ANSI)
            buffer.raw_lines.extend(s.lines().map(String::from));

            // Store stripped (without ANSI)
            let stripped = strip(buf);
            let stripped_str = String::from_utf8_lossy(&stripped);
            buffer.lines.extend(stripped_str.lines().map(String::from));
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptlog_core::values;

    fn info(tc: &TestConsole, line: &str) {
        tc.emit(ConsoleMethod::Info, line, &StyleDirective::color("cyan"));
    }

    #[test]
    fn test_new_creates_plain_console() {
        let tc = TestConsole::new();
        assert!(!tc.is_rich());
    }

    #[test]
    fn test_new_rich_keeps_ansi_in_raw_output() {
        let tc = TestConsole::new_rich();
        assert!(tc.is_rich());
        info(&tc, "colored");
        assert_eq!(tc.output(), vec!["colored".to_string()]);
        assert_eq!(tc.raw_output(), vec!["\u{1b}[36mcolored\u{1b}[39m".to_string()]);
    }

    #[test]
    fn test_output_capture() {
        let tc = TestConsole::new();
        info(&tc, "Hello, world!");
        assert!(tc.contains("Hello"));
        assert!(tc.contains("world"));
    }

    #[test]
    fn test_contains_case_insensitive() {
        let tc = TestConsole::new();
        info(&tc, "Hello World");
        assert!(tc.contains("hello"));
        assert!(tc.contains("WORLD"));
    }

    #[test]
    fn test_contains_all() {
        let tc = TestConsole::new();
        info(&tc, "The quick brown fox");
        assert!(tc.contains_all(&["quick", "brown", "fox"]));
        assert!(!tc.contains_all(&["quick", "lazy"]));
    }

    #[test]
    fn test_assert_not_contains() {
        let tc = TestConsole::new();
        info(&tc, "Success");
        tc.assert_not_contains("Error");
    }

    #[test]
    fn test_entries_record_calls() {
        let tc = TestConsole::new();
        info(&tc, "line");
        tc.dir(&Value::from("x"));
        tc.trace(&values!["at %d", 3]);

        let entries = tc.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].kind, EntryKind::Emit(ConsoleMethod::Info));
        assert_eq!(entries[0].style, Some(StyleDirective::color("cyan")));
        assert_eq!(entries[1].kind, EntryKind::Dir);
        assert_eq!(entries[1].text, "'x'");
        assert_eq!(entries[2].kind, EntryKind::Trace);
        assert_eq!(entries[2].text, "at 3");
        tc.assert_line_count(3);
        assert_eq!(tc.output()[2], "Trace: at 3");
    }

    #[test]
    fn test_clear() {
        let tc = TestConsole::new();
        info(&tc, "Some output");
        assert!(!tc.output().is_empty());
        tc.clear();
        assert!(tc.output().is_empty());
        tc.assert_entry_count(0);
    }

    #[test]
    fn test_output_string() {
        let tc = TestConsole::new();
        info(&tc, "Line 1");
        info(&tc, "Line 2");
        assert_eq!(tc.output_string(), "Line 1\nLine 2");
    }

    #[test]
    fn test_matches_regex() {
        let tc = TestConsole::new();
        info(&tc, "Error code: 42");
        assert!(tc.matches(r"code: \d+"));
        assert!(!tc.matches(r"code: [a-z]+"));
    }

    #[test]
    fn test_sink_handle_shares_buffer() {
        let tc = TestConsole::new();
        let sink = tc.sink();
        sink.emit(ConsoleMethod::Log, "via handle", &StyleDirective::color("white"));
        assert!(tc.contains("via handle"));
        tc.assert_entry_count(1);
    }

    #[test]
    fn test_default() {
        let tc = TestConsole::default();
        assert!(!tc.is_rich());
    }
}
