use rbdiff_diff::{EmptyFileChange, EmptyFileRecord, is_index_line};
use tracing::debug;

use crate::info::InfoSource;

/// Revision markers for synthesized empty-file headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EmptyFileRevisions {
    /// Working copy or changelist diff: markers come from the working copy.
    #[default]
    Local,
    /// Diff between two committed revisions.
    Range { base: String, tip: String },
}

/// Inputs for the empty-file stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmptyFileStage {
    /// Files the tool reports as deleted when run with `--no-diff-deleted`.
    pub deleted_files: Vec<String>,
    pub revisions: EmptyFileRevisions,
}

/// Gives bare `Index:` entries of zero-length files the headers `svn diff`
/// leaves out.
///
/// An entry is empty when the line after its separator is another `Index:`
/// line or the end of the diff. A deleted file whose revision cannot be looked
/// up is left as the tool printed it.
#[must_use]
pub fn synthesize_empty_files(
    lines: Vec<String>,
    stage: &EmptyFileStage,
    info: &dyn InfoSource,
) -> Vec<String> {
    let total = lines.len();
    let mut result = Vec::with_capacity(total);
    let mut i = 0;

    while i < total {
        let line = &lines[i];
        let bare_entry = is_index_line(line)
            && (i + 2 == total || lines.get(i + 2).is_some_and(|next| is_index_line(next)));
        if !bare_entry {
            result.push(line.clone());
            i += 1;
            continue;
        }

        let filename = line
            .trim()
            .split_once(' ')
            .map_or("", |(_, name)| name.trim());
        let change = if stage.deleted_files.iter().any(|deleted| deleted == filename) {
            EmptyFileChange::Deleted
        } else {
            EmptyFileChange::Added
        };

        match empty_file_record(filename, change, &stage.revisions, info) {
            Some(record) => {
                debug!("Synthesizing headers for empty file {filename} {change}");
                result.extend(record.render());
            }
            None => result.extend_from_slice(&lines[i..i + 2]),
        }
        i += 2;
    }

    result
}

fn empty_file_record(
    filename: &str,
    change: EmptyFileChange,
    revisions: &EmptyFileRevisions,
    info: &dyn InfoSource,
) -> Option<EmptyFileRecord> {
    let (base_marker, tip_marker) = match (revisions, change) {
        (EmptyFileRevisions::Range { base, tip }, _) => {
            (format!("(revision {base})"), format!("(revision {tip})"))
        }
        (EmptyFileRevisions::Local, EmptyFileChange::Deleted) => {
            let revision = info.info(filename)?.revision()?.to_string();
            (format!("(revision {revision})"), "(working copy)".to_string())
        }
        (EmptyFileRevisions::Local, EmptyFileChange::Added) => {
            ("(revision 0)".to_string(), "(revision 0)".to_string())
        }
    };

    Some(EmptyFileRecord {
        filename: filename.to_string(),
        change,
        base_marker,
        tip_marker,
    })
}
