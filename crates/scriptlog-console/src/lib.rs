//! Timestamped, categorized console logging for scriptlog.
//!
//! [`Logger`] composes `prefix[MM/DD HH:MM][LABEL] message` lines, formats
//! the message with [`scriptlog_core::format`], and hands the result to a
//! [`ConsoleSink`] along with the category colour.
//!
//! ```
//! use scriptlog_console::{Logger, Value, values};
//! use scriptlog_console::testing::TestConsole;
//!
//! let console = TestConsole::new();
//! let logger = Logger::new(false, true).with_sink(console.sink());
//!
//! logger.warn(&values!["%d retries left", 2]);
//! logger.dir(&Value::array(values![1, 2]), &values!["queue"]);
//!
//! console.assert_contains("[WARN] 2 retries left");
//! console.assert_contains("[ 1, 2 ]");
//! console.assert_entry_count(3);
//! ```

#![forbid(unsafe_code)]

pub mod category; // Category table
pub mod config; // LoggerConfig, env + TOML loading
pub mod detection; // Colour detection
pub mod logger; // Logger + log::Log bridge
pub mod padding; // Timestamp padding helpers
pub mod sink; // ConsoleSink, StreamSink
pub mod testing; // Test utilities

pub use category::{Category, CategoryDescriptor, CategoryTable, categories};
pub use config::{ConfigError, LoggerConfig};
pub use detection::should_enable_color;
pub use logger::Logger;
pub use sink::{ConsoleMethod, ConsoleSink, StreamSink, StyleDirective};

pub use scriptlog_core;
pub use scriptlog_core::{
    ErrorValue, InspectOptions, Value, format, inspect, is_boolean, is_function, is_null, is_object,
    is_string, is_undefined, values,
};
