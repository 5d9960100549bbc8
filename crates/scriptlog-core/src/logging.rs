//! Diagnostics for the scriptlog crates themselves.
//!
//! Internal messages go through the standard [`log`] facade so they can be
//! routed (or silenced) by whatever backend the application installs,
//! including scriptlog's own `Logger`.
//!
//! # Log Targets
//!
//! - `scriptlog`: Root target
//! - `scriptlog::format`: Template substitution and inspection
//! - `scriptlog::console`: Sink writes and logger setup
//!
//! Example filter: `RUST_LOG=scriptlog::format=debug`

// Re-export log macros for ergonomic use
pub use log::{debug, error, info, trace, warn};

pub use log::{Level, LevelFilter};

/// Log targets used by scriptlog components.
pub mod targets {
    /// Root target for all scriptlog diagnostics.
    pub const SCRIPTLOG: &str = "scriptlog";

    /// Formatting and inspection.
    pub const FORMAT: &str = "scriptlog::format";

    /// Console sinks and logger configuration.
    pub const CONSOLE: &str = "scriptlog::console";
}

/// Returns whether diagnostics are enabled at `level` for `target`.
#[inline]
#[must_use]
pub fn is_enabled(level: Level, target: &str) -> bool {
    log::log_enabled!(target: target, level)
}
