use std::sync::OnceLock;

use rbdiff_core::{
    ClientContext, DiffResult, EMPTY_FILES_CAPABILITY, RepositoryInfo, Result, RevisionSpec,
    ScmClient, ScmError,
};
use rbdiff_diff::EmptyFileMarkers;
use rbdiff_process::{ExecOptions, ToolCommand};
use tracing::debug;

use crate::diff::{DiffPlan, apply_copies_as_adds, plan_diff};
use crate::info::{SvnInfo, SvnInfoLookup};
use crate::postprocess::{DiffPostProcessor, EmptyFileStage};
use crate::register::register_empty_files;
use crate::revisions::RevisionResolver;

pub const SVN_CLIENT_NAME: &str = "svn";

/// Subversion through the `svn` command line client.
#[derive(Debug)]
pub struct SvnClient {
    ctx: ClientContext,
    repository: OnceLock<Option<RepositoryInfo>>,
}

impl SvnClient {
    #[must_use]
    pub fn new(ctx: ClientContext) -> Self {
        Self {
            ctx,
            repository: OnceLock::new(),
        }
    }

    fn url_mode(&self) -> bool {
        self.ctx.repository_url().is_some()
    }

    fn repository_info(&self) -> Option<RepositoryInfo> {
        self.repository
            .get_or_init(|| detect_repository(&self.ctx))
            .clone()
    }

    /// Files `svn diff --no-diff-deleted` reports as deleted, or `None` if
    /// that run fails or prints nothing.
    fn deleted_files(&self, plan: &DiffPlan) -> Option<Vec<String>> {
        let command = plan.command.clone().arg("--no-diff-deleted");
        let output = self
            .ctx
            .run(command, &ExecOptions::lookup().without_stderr())
            .ok()
            .flatten()
            .filter(|output| !output.is_empty())?;
        Some(EmptyFileMarkers::deleted_in_tool_output(&output))
    }
}

fn detect_repository(ctx: &ClientContext) -> Option<RepositoryInfo> {
    let mut command = ToolCommand::new("svn").arg("info");
    if let Some(url) = ctx.repository_url() {
        command = command.arg(url);
    }
    let command = command.arg("--non-interactive");

    let output = ctx.run(command, &ExecOptions::lookup()).ok().flatten()?;
    let info = SvnInfo::parse(&output);

    let root = info.repository_root()?;
    let url = info.url()?;
    let uuid = info.repository_uuid()?;
    let base_path = url.get(root.len()..).filter(|rest| !rest.is_empty()).unwrap_or("/");

    Some(RepositoryInfo::new(root, base_path).with_uuid(uuid))
}

impl ScmClient for SvnClient {
    fn name(&self) -> &'static str {
        SVN_CLIENT_NAME
    }

    fn context(&self) -> &ClientContext {
        &self.ctx
    }

    fn detect(&self) -> Result<Option<RepositoryInfo>> {
        Ok(self.repository_info())
    }

    fn resolve(&self, revisions: &[String]) -> Result<RevisionSpec> {
        RevisionResolver::new(&self.ctx).resolve(revisions)
    }

    fn diff(&self, spec: &RevisionSpec, include_files: &[String]) -> Result<DiffResult> {
        let mut repository = self.repository_info().ok_or(ScmError::RepositoryNotFound)?;
        let url_mode = self.url_mode();

        let mut plan = plan_diff(&mut repository, spec, include_files, url_mode);
        apply_copies_as_adds(&self.ctx, &mut plan)?;

        let raw = self
            .ctx
            .run(plan.command.clone(), &ExecOptions::new().without_stderr())?
            .unwrap_or_default();

        let lookup = SvnInfoLookup::new(&self.ctx);
        let mut processor = DiffPostProcessor::new(&lookup, &repository, url_mode);
        if self.supports_empty_files() {
            match self.deleted_files(&plan) {
                Some(deleted_files) => {
                    processor = processor.with_empty_files(EmptyFileStage {
                        deleted_files,
                        revisions: plan.revisions.clone(),
                    });
                }
                None => debug!("No output from the deleted-files diff, leaving empty files alone"),
            }
        }

        Ok(DiffResult::new(Some(processor.process(&raw))))
    }

    fn supports_empty_files(&self) -> bool {
        self.ctx.has_capability(&EMPTY_FILES_CAPABILITY)
    }

    fn register_empty_files(&self, markers: &EmptyFileMarkers) -> Result<bool> {
        register_empty_files(&self.ctx, markers)
    }
}
