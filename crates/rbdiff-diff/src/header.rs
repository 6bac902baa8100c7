use std::sync::LazyLock;

use regex::Regex;

static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("valid space-run regex"));

/// The path of a diff header line and everything after it, with the
/// separator normalized to a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameHeader {
    pub filename: String,
    pub rest: String,
}

/// Splits the payload of a `---`/`+++`/`Index:` line into filename and info.
///
/// A tab is the proper separator and lets filenames contain spaces. Some tools
/// separate with runs of spaces instead; in that case filenames are assumed
/// not to contain two consecutive spaces, and the space run wins over a tab.
#[must_use]
pub fn parse_filename_header(payload: &str) -> FilenameHeader {
    let mut parts = payload.split_once('\t');

    if let Some(run) = SPACE_RUN.find(payload) {
        parts = Some((&payload[..run.start()], &payload[run.end()..]));
    }

    match parts {
        Some((filename, info)) => FilenameHeader {
            filename: filename.to_owned(),
            rest: format!("\t{info}"),
        },
        None => {
            let (filename, rest) = match payload.split_once('\n') {
                Some((filename, _)) => (filename, "\n"),
                None => (payload, ""),
            };
            FilenameHeader {
                filename: filename.to_owned(),
                rest: rest.to_owned(),
            }
        }
    }
}
