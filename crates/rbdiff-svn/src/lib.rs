//! Subversion support: revision resolution, diff generation and
//! post-processing, and registration of empty files after a patch.

mod client;
mod diff;
mod info;
pub mod postprocess;
mod register;
mod revisions;

pub use client::{SVN_CLIENT_NAME, SvnClient};
pub use diff::{DiffPlan, apply_copies_as_adds, history_scheduled_with_commit, plan_diff};
pub use info::{InfoSource, SvnInfo, SvnInfoLookup, peg_safe_path, unquote};
pub use postprocess::DiffPostProcessor;
pub use register::register_empty_files;
pub use revisions::RevisionResolver;
