use rbdiff_core::{ClientContext, RepositoryInfo, Result, Revision, RevisionSpec, ScmError};
use rbdiff_process::{ExecOptions, ToolCommand};
use tracing::debug;

use crate::postprocess::EmptyFileRevisions;

/// A ready-to-run `svn diff` invocation and what the post-processor needs
/// to know about it.
#[derive(Debug, Clone)]
pub struct DiffPlan {
    pub command: ToolCommand,
    pub changelist: Option<String>,
    pub revisions: EmptyFileRevisions,
}

/// Builds the `svn diff` command for `spec`.
///
/// Between two URLs, a single entry in `include_files` becomes the base path
/// of `repository` instead of a filter.
#[must_use]
pub fn plan_diff(
    repository: &mut RepositoryInfo,
    spec: &RevisionSpec,
    include_files: &[String],
    url_mode: bool,
) -> DiffPlan {
    let mut command = ToolCommand::new("svn").args(["diff", "--diff-cmd=diff", "--notice-ancestry"]);
    let mut files = include_files;
    let mut changelist = None;
    let mut revisions = EmptyFileRevisions::Local;
    let base = spec.base.to_string();

    match &spec.tip {
        Revision::WorkingCopy => {
            command = command.args(["-r", base.as_str()]);
        }
        Revision::Changelist(name) => {
            command = command.args(["--changelist", name.as_str()]);
            changelist = Some(name.clone());
        }
        Revision::Concrete(tip) => {
            if url_mode {
                if let [single] = include_files {
                    repository.set_base_path(single);
                    files = &[];
                }

                let root = repository.path().to_string();
                let new_url = format!("{root}{}@{tip}", repository.base_path());
                // The base path did not exist at revision 0.
                let old_url = if base == "0" {
                    format!("{root}@{base}")
                } else {
                    format!("{root}{}@{base}", repository.base_path())
                };
                command = command.arg(old_url).arg(new_url);
            } else {
                command = command.args(["-r".to_string(), format!("{base}:{tip}")]);
            }

            revisions = EmptyFileRevisions::Range {
                base: base.clone(),
                tip: tip.clone(),
            };
        }
    }

    DiffPlan {
        command: command.args(files.iter().cloned()),
        changelist,
        revisions,
    }
}

/// Whether any file in the working copy (or `changelist`) is copied with
/// history, shown by `svn status` as a `+` in the fourth column.
///
/// A failing status is read as "no".
#[must_use]
pub fn history_scheduled_with_commit(ctx: &ClientContext, changelist: Option<&str>) -> bool {
    let mut command = ToolCommand::new("svn").args(["status", "--ignore-externals"]);
    if let Some(changelist) = changelist {
        command = command.args(["--changelist", changelist]);
    }

    let Some(status) = ctx
        .run(command, &ExecOptions::lookup().without_stderr())
        .ok()
        .flatten()
    else {
        return false;
    };

    status.lines().any(|line| line.chars().nth(3) == Some('+'))
}

/// Applies the user's choice for files copied with history.
///
/// # Errors
///
/// Returns [`ScmError::HistoryScheduledWithCommit`] if there are such files
/// and no choice was made.
pub fn apply_copies_as_adds(ctx: &ClientContext, plan: &mut DiffPlan) -> Result<()> {
    if ctx.repository_url().is_some()
        || !history_scheduled_with_commit(ctx, plan.changelist.as_deref())
    {
        return Ok(());
    }

    match ctx.options().svn_show_copies_as_adds {
        None => Err(ScmError::HistoryScheduledWithCommit),
        Some(true) => {
            debug!("Sending copied files as additions");
            plan.command = plan.command.clone().arg("--show-copies-as-adds");
            Ok(())
        }
        Some(false) => Ok(()),
    }
}
