use rbdiff_diff::{
    is_complete_removal_hunk, is_new_file_line, is_orig_file_line, parse_filename_header,
};

use crate::info::{InfoSource, unquote};

/// A file whose diff should be read against another path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRecord {
    pub to_path: String,
    pub copied_from_path: String,
}

/// Finds where `path` was copied from.
///
/// `svn info` only reports the origin on the exact path that was copied, so a
/// file moved along with a directory is found by walking up its ancestors.
/// The walk stops at the first ancestor not scheduled `normal` or at the
/// root.
#[must_use]
pub fn find_copyfrom(info: &dyn InfoSource, path: &str) -> Option<RenameRecord> {
    let mut head = path.to_string();
    let mut tail: Option<String> = None;

    loop {
        let entry = info.info(&head).unwrap_or_default();

        if let Some(url) = entry.copied_from_url() {
            let root = entry.repository_root().unwrap_or_default();
            let origin = unquote(url.strip_prefix(root).unwrap_or(url));
            return Some(RenameRecord {
                to_path: path.to_string(),
                copied_from_path: join_path(&origin, tail.as_deref()),
            });
        }

        if entry.schedule() != Some("normal") {
            return None;
        }

        let (parent, name) = split_path(&head);
        if parent.is_empty() || parent == "/" {
            return None;
        }
        tail = Some(join_path(name, tail.as_deref()));
        head = parent.to_string();
    }
}

/// Rewrites the `---` header of copied and moved files to name their origin.
///
/// A pair followed by a complete-removal hunk is the deletion half of a
/// replaced file and keeps its header. Only the path token is replaced, so
/// running this twice gives the same result.
#[must_use]
pub fn reattribute_renames(lines: Vec<String>, info: &dyn InfoSource) -> Vec<String> {
    let mut result = Vec::with_capacity(lines.len());
    let mut from_line: Option<String> = None;
    let mut to_line: Option<String> = None;

    for line in lines {
        if is_orig_file_line(&line) {
            flush_headers(&mut result, &mut from_line, &mut to_line);
            from_line = Some(line);
            continue;
        }

        if is_new_file_line(&line) {
            if to_line.is_some() {
                flush_headers(&mut result, &mut from_line, &mut to_line);
            }
            to_line = Some(line);
            continue;
        }

        if let (Some(from), Some(to)) = (&from_line, &to_line) {
            let from = if is_complete_removal_hunk(&line) {
                from.clone()
            } else {
                rewrite_origin(from, to, info)
            };
            result.push(from);
            result.push(to.clone());
            from_line = None;
            to_line = None;
        } else {
            flush_headers(&mut result, &mut from_line, &mut to_line);
        }

        result.push(line);
    }

    flush_headers(&mut result, &mut from_line, &mut to_line);
    result
}

fn flush_headers(result: &mut Vec<String>, from: &mut Option<String>, to: &mut Option<String>) {
    result.extend(from.take());
    result.extend(to.take());
}

fn rewrite_origin(from_line: &str, to_line: &str, info: &dyn InfoSource) -> String {
    let (Some(to_payload), Some(from_payload)) = (header_payload(to_line), header_payload(from_line))
    else {
        return from_line.to_string();
    };
    let to_file = parse_filename_header(to_payload).filename;

    match find_copyfrom(info, &to_file) {
        Some(record) => {
            let rest = parse_filename_header(from_payload).rest;
            format!("--- {}{rest}", record.copied_from_path)
        }
        None => from_line.to_string(),
    }
}

/// Everything after the `---`/`+++` token and its separator.
fn header_payload(line: &str) -> Option<&str> {
    let mut chars = line.char_indices().skip(3);
    let (_, separator) = chars.next()?;
    if !separator.is_whitespace() {
        return None;
    }
    Some(chars.next().map_or("", |(at, _)| &line[at..]))
}

fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        None => ("", path),
        Some(at) => {
            let parent = path[..at].trim_end_matches('/');
            let parent = if parent.is_empty() { "/" } else { parent };
            (parent, &path[at + 1..])
        }
    }
}

fn join_path(head: &str, tail: Option<&str>) -> String {
    match tail {
        None | Some("") => head.to_string(),
        Some(tail) if head.ends_with('/') => format!("{head}{tail}"),
        Some(tail) => format!("{head}/{tail}"),
    }
}
