//! Fixed-width padding for timestamp fields.

use std::fmt::Display;

/// Left-pad `value` with `fill` to `width` characters.
///
/// The result is always the last `width` characters of `fill` repeated
/// `width` times followed by the value, so a value wider than `width` keeps
/// only its tail.
///
/// ```
/// use scriptlog_console::padding::pad_left;
///
/// assert_eq!(pad_left(7, 2, "0"), "07");
/// assert_eq!(pad_left(123, 2, "0"), "23");
/// ```
#[must_use]
pub fn pad_left(value: impl Display, width: usize, fill: impl Display) -> String {
    let padded: Vec<char> = fill
        .to_string()
        .repeat(width)
        .chars()
        .chain(value.to_string().chars())
        .collect();
    let start = padded.len().saturating_sub(width);
    padded[start..].iter().collect()
}

/// Right-pad `value` to exactly `width` positions.
///
/// Each position holds the value's character at that index, or `fill` where
/// the value has none.
///
/// ```
/// use scriptlog_console::padding::pad_right;
///
/// assert_eq!(pad_right("ab", 4, "-"), "ab--");
/// ```
#[must_use]
pub fn pad_right(value: impl Display, width: usize, fill: impl Display) -> String {
    let chars: Vec<char> = value.to_string().chars().collect();
    let fill = fill.to_string();
    (0..width)
        .map(|i| chars.get(i).map_or_else(|| fill.clone(), char::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_left() {
        assert_eq!(pad_left(7, 2, "0"), "07");
        assert_eq!(pad_left(12, 2, "0"), "12");
        assert_eq!(pad_left(123, 2, "0"), "23");
        assert_eq!(pad_left("x", 4, ' '), "   x");
        assert_eq!(pad_left(5, 0, "0"), "");
    }

    #[test]
    fn test_pad_left_multichar_fill() {
        assert_eq!(pad_left(1, 5, "ab"), "abab1");
    }

    #[test]
    fn test_pad_right() {
        assert_eq!(pad_right("ab", 4, "-"), "ab--");
        assert_eq!(pad_right("abcdef", 3, "-"), "abc");
        assert_eq!(pad_right("", 2, ' '), "  ");
    }

    #[test]
    fn test_pad_right_fill_per_position() {
        assert_eq!(pad_right("a", 3, "xy"), "axyxy");
    }
}
