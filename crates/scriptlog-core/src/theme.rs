//! ANSI colour table and the style-kind → colour mapping.
//!
//! The theme is an immutable static built once; every inspection reads it
//! through [`theme()`].

use std::sync::OnceLock;

/// Named ANSI SGR attributes usable as styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnsiColor {
    Bold,
    Italic,
    Underline,
    Inverse,
    White,
    Grey,
    Black,
    Blue,
    Cyan,
    Green,
    Magenta,
    Red,
    Yellow,
}

impl AnsiColor {
    pub const ALL: [AnsiColor; 13] = [
        AnsiColor::Bold,
        AnsiColor::Italic,
        AnsiColor::Underline,
        AnsiColor::Inverse,
        AnsiColor::White,
        AnsiColor::Grey,
        AnsiColor::Black,
        AnsiColor::Blue,
        AnsiColor::Cyan,
        AnsiColor::Green,
        AnsiColor::Magenta,
        AnsiColor::Red,
        AnsiColor::Yellow,
    ];

    /// Open and close SGR codes.
    #[must_use]
    pub fn codes(self) -> (u8, u8) {
        match self {
            AnsiColor::Bold => (1, 22),
            AnsiColor::Italic => (3, 23),
            AnsiColor::Underline => (4, 24),
            AnsiColor::Inverse => (7, 27),
            AnsiColor::White => (37, 39),
            AnsiColor::Grey => (90, 39),
            AnsiColor::Black => (30, 39),
            AnsiColor::Blue => (34, 39),
            AnsiColor::Cyan => (36, 39),
            AnsiColor::Green => (32, 39),
            AnsiColor::Magenta => (35, 39),
            AnsiColor::Red => (31, 39),
            AnsiColor::Yellow => (33, 39),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AnsiColor::Bold => "bold",
            AnsiColor::Italic => "italic",
            AnsiColor::Underline => "underline",
            AnsiColor::Inverse => "inverse",
            AnsiColor::White => "white",
            AnsiColor::Grey => "grey",
            AnsiColor::Black => "black",
            AnsiColor::Blue => "blue",
            AnsiColor::Cyan => "cyan",
            AnsiColor::Green => "green",
            AnsiColor::Magenta => "magenta",
            AnsiColor::Red => "red",
            AnsiColor::Yellow => "yellow",
        }
    }

    /// Look a colour up by name. Names outside the table yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Wrap `text` in this colour's open and close sequences.
    #[must_use]
    pub fn paint(self, text: &str) -> String {
        let (open, close) = self.codes();
        format!("\u{1b}[{open}m{text}\u{1b}[{close}m")
    }
}

/// Kinds of terminal token the inspector styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    Special,
    Number,
    Boolean,
    Undefined,
    Null,
    String,
    Date,
    RegExp,
    /// Property names. Deliberately unstyled.
    Name,
}

/// Style-kind → colour mapping.
#[derive(Debug, Clone)]
pub struct InspectTheme {
    styles: Vec<(StyleKind, AnsiColor)>,
}

impl InspectTheme {
    fn standard() -> Self {
        // Blue is left out: unreadable on some terminals.
        Self {
            styles: vec![
                (StyleKind::Special, AnsiColor::Cyan),
                (StyleKind::Number, AnsiColor::Yellow),
                (StyleKind::Boolean, AnsiColor::Yellow),
                (StyleKind::Undefined, AnsiColor::Grey),
                (StyleKind::Null, AnsiColor::Bold),
                (StyleKind::String, AnsiColor::Green),
                (StyleKind::Date, AnsiColor::Magenta),
                (StyleKind::RegExp, AnsiColor::Red),
            ],
        }
    }

    #[must_use]
    pub fn color_for(&self, kind: StyleKind) -> Option<AnsiColor> {
        self.styles
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, color)| *color)
    }

    /// Wrap `text` for `kind`, or return it unchanged if the kind has no colour.
    #[must_use]
    pub fn stylize(&self, text: &str, kind: StyleKind) -> String {
        match self.color_for(kind) {
            Some(color) => color.paint(text),
            None => text.to_string(),
        }
    }
}

static THEME: OnceLock<InspectTheme> = OnceLock::new();

/// The process-wide inspection theme.
#[must_use]
pub fn theme() -> &'static InspectTheme {
    THEME.get_or_init(InspectTheme::standard)
}
