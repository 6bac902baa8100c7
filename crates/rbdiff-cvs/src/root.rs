use std::fs;
use std::io;
use std::path::Path;

use rbdiff_core::{Result, ScmError};

/// Location of the root file inside a checked-out CVS directory.
pub const CVS_ROOT_FILE: &str = "CVS/Root";

/// The repository path of a `CVSROOT` string, without the `user@` prefix.
///
/// `:pserver:anon@cvs.example.com:/cvsroot` becomes
/// `cvs.example.com:/cvsroot`.
///
/// Everything up to the last `@` is dropped, so an `@` inside the user name
/// goes with it. The host is compared as written and never canonicalized.
#[must_use]
pub fn repository_path(root: &str) -> &str {
    let root = root.trim();
    root.rsplit_once('@').map_or(root, |(_, path)| path)
}

/// Reads `CVS/Root` below `dir`. A missing file means `dir` is not a
/// checkout.
pub(crate) fn read_root(dir: &Path) -> Result<Option<String>> {
    let path = dir.join(CVS_ROOT_FILE);
    match fs::read_to_string(&path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ScmError::Io { path, source }),
    }
}
