use std::fs;
use std::path::Path;

use rbdiff_core::{ClientContext, Result, ScmError};
use rbdiff_diff::EmptyFileMarkers;
use rbdiff_process::{ExecOptions, ToolCommand};
use tracing::{error, warn};

/// Creates and schedules empty files a patch added, and schedules the ones it
/// deleted. Returns whether `svn` accepted any of them.
///
/// Absolute paths are skipped with a warning. They come from a patch applied
/// without a strip count and do not name anything inside the working copy.
///
/// # Errors
///
/// Returns [`ScmError::Io`] if an added file cannot be created.
pub fn register_empty_files(ctx: &ClientContext, markers: &EmptyFileMarkers) -> Result<bool> {
    let mut registered = false;
    let added = relative_paths(&markers.added);
    let deleted = relative_paths(&markers.deleted);

    if !added.is_empty() {
        for file in &added {
            let path = ctx.working_dir().join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| ScmError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::File::create(&path).map_err(|source| ScmError::Io { path, source })?;
        }
        registered |= schedule(ctx, "add", &added);
    }

    if !deleted.is_empty() {
        registered |= schedule(ctx, "delete", &deleted);
    }

    Ok(registered)
}

fn relative_paths(files: &[String]) -> Vec<String> {
    files
        .iter()
        .filter(|file| {
            let absolute = file.starts_with('/') || Path::new(file.as_str()).is_absolute();
            if absolute {
                warn!("Skipping empty file with absolute path {file}; pass a strip count to register it");
            }
            !absolute
        })
        .cloned()
        .collect()
}

fn schedule(ctx: &ClientContext, subcommand: &str, files: &[String]) -> bool {
    let command = ToolCommand::new("svn").arg(subcommand).args(files.iter().cloned());
    let accepted = matches!(ctx.run(command, &ExecOptions::lookup()), Ok(Some(_)));
    if !accepted {
        error!("Unable to execute \"svn {subcommand}\" on: {}", files.join(", "));
    }
    accepted
}
