mod diff;
mod list_repo_types;
mod patch;
mod resolve;

use std::path::PathBuf;

use clap::Subcommand;

use crate::environment::GlobalArgs;
use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Resolve revision arguments and print the range as JSON
    Resolve {
        /// Revisions, a range (`A..B` or `A:B`), or a changelist name
        revisions: Vec<String>,
    },
    /// Print the diff for the given revisions or the working copy
    Diff {
        /// Revisions, a range (`A..B` or `A:B`), or a changelist name
        revisions: Vec<String>,

        /// Only diff this path (repeatable)
        #[arg(short = 'I', long = "include", value_name = "PATH")]
        include: Vec<String>,

        /// Send files copied with history as plain additions (y/n)
        #[arg(long, value_name = "Y|N", value_parser = parse_yes_no)]
        svn_show_copies_as_adds: Option<bool>,

        /// Branch to produce a parent diff against
        #[arg(long, value_name = "BRANCH")]
        parent: Option<String>,
    },
    /// Apply a patch file to the working copy
    Patch {
        patch_file: PathBuf,

        /// Strip this many leading path components from file names
        #[arg(long = "px", value_name = "N")]
        strip: Option<u32>,

        /// Directory the diff was made in, relative to the repository root
        #[arg(long, value_name = "DIR")]
        base_dir: Option<String>,
    },
    /// List supported repository types, marking detected ones with '*'
    ListRepoTypes,
}

impl Commands {
    pub(crate) fn execute(self, mut globals: GlobalArgs) -> Result<()> {
        match self {
            Self::Resolve { revisions } => resolve::run(globals, &revisions),
            Self::Diff {
                revisions,
                include,
                svn_show_copies_as_adds,
                parent,
            } => {
                globals.show_copies_as_adds = svn_show_copies_as_adds;
                diff::run(globals, revisions, include, parent.as_deref())
            }
            Self::Patch {
                patch_file,
                strip,
                base_dir,
            } => patch::run(globals, patch_file, strip, base_dir),
            Self::ListRepoTypes => list_repo_types::run(globals),
        }
    }
}

fn parse_yes_no(value: &str) -> std::result::Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(format!("expected y or n, got '{value}'")),
    }
}
