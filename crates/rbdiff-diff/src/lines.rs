use std::sync::LazyLock;

use regex::Regex;

pub const INDEX_PREFIX: &str = "Index: ";

static ORIG_FILE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---\s+.*\s+\(.*\)").expect("valid '---' header regex"));

static NEW_FILE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+\+\+\s+.*\s+\(.*\)").expect("valid '+++' header regex"));

static COMPLETE_REMOVAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@@ -1,\d+ \+0,0 @@$").expect("valid removal hunk regex"));

/// Splits tool output into lines, keeping each line's terminator.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_owned).collect()
}

#[must_use]
pub fn join_lines(lines: &[String]) -> String {
    lines.concat()
}

#[must_use]
pub fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// `--- path\t(revision N)` style header.
#[must_use]
pub fn is_orig_file_line(line: &str) -> bool {
    ORIG_FILE_LINE.is_match(trim_line_ending(line))
}

/// `+++ path\t(working copy)` style header.
#[must_use]
pub fn is_new_file_line(line: &str) -> bool {
    NEW_FILE_LINE.is_match(trim_line_ending(line))
}

#[must_use]
pub fn is_index_line(line: &str) -> bool {
    line.starts_with(INDEX_PREFIX)
}

/// A single hunk taking the whole original file down to zero lines. Subversion
/// emits this for the deletion half of a replaced file.
#[must_use]
pub fn is_complete_removal_hunk(line: &str) -> bool {
    COMPLETE_REMOVAL.is_match(trim_line_ending(line))
}

/// Splits a structural line (`Index:`, `---` or `+++`) into its fixed prefix
/// token and the path payload that follows the first space.
#[must_use]
pub fn split_structural_prefix(line: &str) -> Option<(&str, &str)> {
    if is_index_line(line) || is_orig_file_line(line) || is_new_file_line(line) {
        line.split_once(' ')
    } else {
        None
    }
}
