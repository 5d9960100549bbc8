//! Log categories and their display metadata.
//!
//! The standard table is built once and shared by every [`crate::Logger`]
//! that does not bring its own.

use std::sync::{Arc, LazyLock};

use crate::sink::{ConsoleMethod, StyleDirective};

/// A named kind of log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Log,
    Info,
    Warn,
    Error,
    Dir,
    Trace,
    Debug,
    /// Fallback for names that match nothing else.
    Unknown,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Log,
        Category::Info,
        Category::Warn,
        Category::Error,
        Category::Dir,
        Category::Trace,
        Category::Debug,
        Category::Unknown,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Category::Log => "log",
            Category::Info => "info",
            Category::Warn => "warn",
            Category::Error => "error",
            Category::Dir => "dir",
            Category::Trace => "trace",
            Category::Debug => "debug",
            Category::Unknown => "unknown",
        }
    }

    /// Resolve a category by name; unrecognised names give [`Category::Unknown`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == name)
            .unwrap_or(Category::Unknown)
    }
}

/// How a category is shown and where it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDescriptor {
    /// Text inside the `[...]` tag.
    pub label: String,
    /// Colour name carried in the style directive.
    pub color: String,
    pub method: ConsoleMethod,
}

impl CategoryDescriptor {
    #[must_use]
    pub fn new(label: impl Into<String>, color: impl Into<String>, method: ConsoleMethod) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
            method,
        }
    }

    #[must_use]
    pub fn style(&self) -> StyleDirective {
        StyleDirective::color(self.color.clone())
    }
}

/// Immutable category → descriptor mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    entries: Vec<(Category, CategoryDescriptor)>,
}

impl CategoryTable {
    /// The built-in table.
    #[must_use]
    pub fn standard() -> Self {
        use ConsoleMethod::{Error, Info, Log, Warn};

        let entries = vec![
            (Category::Log, CategoryDescriptor::new("LOG", "white", Log)),
            (Category::Info, CategoryDescriptor::new("INFO", "cyan", Info)),
            (Category::Warn, CategoryDescriptor::new("WARN", "yellow", Warn)),
            (Category::Error, CategoryDescriptor::new("ERR!", "red", Error)),
            (Category::Dir, CategoryDescriptor::new("DIR?", "blue", Log)),
            (Category::Trace, CategoryDescriptor::new("TRCE", "green", Log)),
            (Category::Debug, CategoryDescriptor::new("DBUG", "magenta", Log)),
            (Category::Unknown, CategoryDescriptor::new("????", "pink", Log)),
        ];
        Self { entries }
    }

    /// Replace one category's descriptor.
    #[must_use]
    pub fn with_descriptor(mut self, category: Category, descriptor: CategoryDescriptor) -> Self {
        if let Some(slot) = self.entries.iter_mut().find(|(c, _)| *c == category) {
            slot.1 = descriptor;
        } else {
            self.entries.push((category, descriptor));
        }
        self
    }

    /// Descriptor for `category`, falling back to the `Unknown` entry.
    #[must_use]
    pub fn get(&self, category: Category) -> &CategoryDescriptor {
        self.find(category)
            .or_else(|| self.find(Category::Unknown))
            .unwrap_or_else(|| &*FALLBACK)
    }

    /// Descriptor for a category name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> &CategoryDescriptor {
        self.get(Category::from_name(name))
    }

    fn find(&self, category: Category) -> Option<&CategoryDescriptor> {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, d)| d)
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::standard()
    }
}

static FALLBACK: LazyLock<CategoryDescriptor> =
    LazyLock::new(|| CategoryDescriptor::new("????", "pink", ConsoleMethod::Log));

static STANDARD: LazyLock<Arc<CategoryTable>> =
    LazyLock::new(|| Arc::new(CategoryTable::standard()));

/// Shared handle to the standard table.
#[must_use]
pub fn categories() -> Arc<CategoryTable> {
    Arc::clone(&STANDARD)
}
