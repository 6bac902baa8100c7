use rbdiff_diff::{parse_filename_header, split_structural_prefix};

use crate::info::{InfoSource, unquote};

/// How a relative diff path is made repository-absolute.
#[derive(Clone, Copy)]
pub enum PathResolution<'a> {
    /// Diff between two URLs: paths are relative to the base path.
    Url { base_path: &'a str },
    /// Working copy diff: ask `svn info` for each file's URL.
    WorkingCopy { info: &'a dyn InfoSource },
}

/// Rewrites `Index:`, `---` and `+++` paths relative to the repository root.
/// Lines whose file cannot be looked up are kept as they are.
#[must_use]
pub fn convert_to_absolute_paths(lines: Vec<String>, resolution: PathResolution<'_>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| absolute_line(&line, resolution).unwrap_or(line))
        .collect()
}

fn absolute_line(line: &str, resolution: PathResolution<'_>) -> Option<String> {
    let (front, payload) = split_structural_prefix(line)?;
    if payload.starts_with('/') {
        return None;
    }

    let header = parse_filename_header(payload);
    let path = match resolution {
        PathResolution::Url { base_path } => {
            let base_path = base_path.trim_end_matches('/');
            unquote(&format!("{base_path}/{}", header.filename))
        }
        PathResolution::WorkingCopy { info } => {
            info.info(&header.filename)?.repository_relative_url()?
        }
    };

    Some(format!("{front} {path}{}", header.rest))
}
