use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::lines::INDEX_PREFIX;

/// The line Subversion prints under every `Index:` line.
pub const INDEX_SEPARATOR: &str =
    "===================================================================";

static ADDED_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Index:\s+(\S+)\t\(added\)\r?$").expect("valid added marker regex")
});

static DELETED_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Index:\s+(\S+)\t\(deleted\)\r?$").expect("valid deleted marker regex")
});

static TOOL_DELETED_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Index:\s+(\S+)\s+\(deleted\)\r?$").expect("valid deleted entry regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyFileChange {
    Added,
    Deleted,
}

impl EmptyFileChange {
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Added => "(added)",
            Self::Deleted => "(deleted)",
        }
    }
}

impl fmt::Display for EmptyFileChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Header lines fabricated for a zero-length file that the native diff
/// printed as a bare `Index:` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyFileRecord {
    pub filename: String,
    pub change: EmptyFileChange,
    pub base_marker: String,
    pub tip_marker: String,
}

impl EmptyFileRecord {
    #[must_use]
    pub fn render(&self) -> [String; 4] {
        [
            format!("{INDEX_PREFIX}{}\t{}\n", self.filename, self.change),
            format!("{INDEX_SEPARATOR}\n"),
            format!("--- {}\t{}\n", self.filename, self.base_marker),
            format!("+++ {}\t{}\n", self.filename, self.tip_marker),
        ]
    }
}

/// Empty files announced by synthesized `Index:` markers in a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmptyFileMarkers {
    pub added: Vec<String>,
    pub deleted: Vec<String>,
}

impl EmptyFileMarkers {
    #[must_use]
    pub fn scan(patch: &str) -> Self {
        Self {
            added: capture_all(&ADDED_MARKER, patch),
            deleted: capture_all(&DELETED_MARKER, patch),
        }
    }

    /// Files the native tool itself reports as deleted, as printed by
    /// `svn diff --no-diff-deleted`.
    #[must_use]
    pub fn deleted_in_tool_output(output: &str) -> Vec<String> {
        capture_all(&TOOL_DELETED_ENTRY, output)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }
}

fn capture_all(regex: &Regex, text: &str) -> Vec<String> {
    regex
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
        .collect()
}
