mod empty_files;
mod paths;
mod renames;

pub use empty_files::{EmptyFileRevisions, EmptyFileStage, synthesize_empty_files};
pub use paths::{PathResolution, convert_to_absolute_paths};
pub use renames::{RenameRecord, find_copyfrom, reattribute_renames};

use rbdiff_core::RepositoryInfo;
use rbdiff_diff::{join_lines, split_lines};

use crate::info::InfoSource;

/// Repairs raw `svn diff` output: copy origins, empty files and absolute
/// paths, in that order.
pub struct DiffPostProcessor<'a> {
    info: &'a dyn InfoSource,
    base_path: &'a str,
    url_mode: bool,
    empty_files: Option<EmptyFileStage>,
}

impl<'a> DiffPostProcessor<'a> {
    /// `url_mode` is set for diffs between two repository URLs, which need
    /// neither rename reattribution nor per-file lookups.
    #[must_use]
    pub fn new(info: &'a dyn InfoSource, repository: &'a RepositoryInfo, url_mode: bool) -> Self {
        Self {
            info,
            base_path: repository.base_path(),
            url_mode,
            empty_files: None,
        }
    }

    #[must_use]
    pub fn with_empty_files(mut self, stage: EmptyFileStage) -> Self {
        self.empty_files = Some(stage);
        self
    }

    #[must_use]
    pub fn process(&self, raw: &str) -> String {
        let mut lines = split_lines(raw);

        if !self.url_mode {
            lines = reattribute_renames(lines, self.info);
        }

        if let Some(stage) = &self.empty_files {
            lines = synthesize_empty_files(lines, stage, self.info);
        }

        let resolution = if self.url_mode {
            PathResolution::Url {
                base_path: self.base_path,
            }
        } else {
            PathResolution::WorkingCopy { info: self.info }
        };
        lines = convert_to_absolute_paths(lines, resolution);

        join_lines(&lines)
    }
}
