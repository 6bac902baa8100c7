use rbdiff_core::{
    BASE_KEYWORD, ClientContext, DiffResult, RepositoryInfo, Result, Revision, RevisionSpec,
    ScmClient, ScmError, expand_range_token,
};
use rbdiff_process::{ExecOptions, ToolCommand};
use tracing::debug;

use crate::root::{read_root, repository_path};

pub const CVS_CLIENT_NAME: &str = "cvs";

/// `cvs diff` exits with 1 when it found differences.
const DIFFERENCES_FOUND: i32 = 1;

#[derive(Debug)]
pub struct CvsClient {
    ctx: ClientContext,
}

impl CvsClient {
    #[must_use]
    pub fn new(ctx: ClientContext) -> Self {
        Self { ctx }
    }
}

impl ScmClient for CvsClient {
    fn name(&self) -> &'static str {
        CVS_CLIENT_NAME
    }

    fn context(&self) -> &ClientContext {
        &self.ctx
    }

    fn detect(&self) -> Result<Option<RepositoryInfo>> {
        let Some(root) = read_root(self.ctx.working_dir())? else {
            debug!("No CVS/Root in {}", self.ctx.working_dir().display());
            return Ok(None);
        };
        Ok(Some(RepositoryInfo::new(repository_path(&root), "/")))
    }

    /// Tags and dates are passed through untouched; CVS has no
    /// repository-wide revision to derive a range from.
    fn resolve(&self, revisions: &[String]) -> Result<RevisionSpec> {
        match expand_range_token(revisions).as_slice() {
            [] => Ok(RevisionSpec::working_copy()),
            [_] => Err(ScmError::invalid_revision(
                "CVS does not support passing in a single revision.",
            )),
            [base, tip] => Ok(RevisionSpec::new(
                Revision::concrete(base.as_str()),
                Revision::concrete(tip.as_str()),
            )),
            _ => Err(ScmError::TooManyRevisions),
        }
    }

    fn diff(&self, spec: &RevisionSpec, include_files: &[String]) -> Result<DiffResult> {
        let mut command = ToolCommand::new("cvs").args(["diff", "-uN"]);

        match (&spec.base, &spec.tip) {
            (Revision::Changelist(_), _) | (_, Revision::Changelist(_)) => {
                return Err(ScmError::invalid_revision("CVS does not support changelists."));
            }
            (Revision::WorkingCopy, _) => {
                return Err(ScmError::invalid_revision(
                    "The working copy cannot be the base of a CVS diff.",
                ));
            }
            (Revision::Concrete(base), Revision::WorkingCopy) => {
                if base != BASE_KEYWORD {
                    command = command.args(["-r", base.as_str()]);
                }
            }
            (Revision::Concrete(base), Revision::Concrete(tip)) => {
                command = command.args(["-r", base.as_str(), "-r", tip.as_str()]);
            }
        }

        let output = self
            .ctx
            .run(
                command.args(include_files.iter().cloned()),
                &ExecOptions::new().ignoring_exit_code(DIFFERENCES_FOUND),
            )?
            .unwrap_or_default();

        Ok(DiffResult::new(Some(output)))
    }
}
