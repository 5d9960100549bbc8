//! Colour support detection
//!
//! Decides whether the default stderr sink should emit ANSI colour.

use std::io::IsTerminal;

/// True when the environment asks for plain output.
#[must_use]
pub fn is_plain_requested() -> bool {
    plain_requested_with(|key| std::env::var(key).ok())
}

/// Determine if colour output should be enabled
#[must_use]
pub fn should_enable_color() -> bool {
    should_enable_color_with(|key| std::env::var(key).ok(), std::io::stderr().is_terminal())
}

fn plain_requested_with(lookup: impl Fn(&str) -> Option<String>) -> bool {
    lookup("SCRIPTLOG_PLAIN").is_some() || lookup("NO_COLOR").is_some()
}

pub(crate) fn should_enable_color_with(
    lookup: impl Fn(&str) -> Option<String>,
    is_terminal: bool,
) -> bool {
    // Explicit enable always wins
    if lookup("SCRIPTLOG_FORCE_COLOR").is_some() {
        return true;
    }
    if plain_requested_with(&lookup) {
        return false;
    }
    is_terminal
}
