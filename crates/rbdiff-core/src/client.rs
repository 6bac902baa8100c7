use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rbdiff_diff::EmptyFileMarkers;
use rbdiff_process::{CommandRunner, ExecOptions, ToolCommand};

use crate::patch::{PatchApplier, PatchOutcome, PatchRequest};
use crate::{Capabilities, DiffResult, RepositoryInfo, Result, RevisionSpec};

/// User choices that change how a backend talks to its tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOptions {
    /// Operate against a repository URL instead of a working copy.
    pub repository_url: Option<String>,
    /// Whether copied files with history are sent as plain additions.
    /// `None` refuses to diff such files.
    pub svn_show_copies_as_adds: Option<bool>,
}

/// Everything a backend needs from its caller: the process runner, the
/// working directory, server capabilities and user options.
#[derive(Clone)]
pub struct ClientContext {
    runner: Arc<dyn CommandRunner>,
    working_dir: PathBuf,
    capabilities: Option<Capabilities>,
    options: ClientOptions,
}

impl ClientContext {
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            working_dir: working_dir.into(),
            capabilities: None,
            options: ClientOptions::default(),
        }
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    #[must_use]
    pub fn capabilities(&self) -> Option<&Capabilities> {
        self.capabilities.as_ref()
    }

    #[must_use]
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    #[must_use]
    pub fn repository_url(&self) -> Option<&str> {
        self.options.repository_url.as_deref()
    }

    #[must_use]
    pub fn has_capability(&self, path: &[&str]) -> bool {
        self.capabilities
            .as_ref()
            .is_some_and(|caps| caps.has_capability(path))
    }

    /// Runs `command` in the working directory unless it names its own.
    ///
    /// # Errors
    ///
    /// Propagates the runner's [`rbdiff_process::ProcessError`].
    pub fn run(
        &self,
        command: ToolCommand,
        options: &ExecOptions,
    ) -> rbdiff_process::Result<Option<String>> {
        let command = if command.working_dir().is_some() {
            command
        } else {
            command.current_dir(&self.working_dir)
        };
        self.runner.run(&command, options)
    }
}

impl fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientContext")
            .field("working_dir", &self.working_dir)
            .field("capabilities", &self.capabilities)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// A source control backend.
pub trait ScmClient: Send + Sync {
    /// Registry key, e.g. `svn`.
    fn name(&self) -> &'static str;

    fn context(&self) -> &ClientContext;

    /// Describes the repository at the working directory or configured URL,
    /// or `None` when this backend does not recognize it.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository tool fails unexpectedly.
    fn detect(&self) -> Result<Option<RepositoryInfo>>;

    /// Turns user revision tokens into a diff range.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScmError::InvalidRevisionSpec`] for tokens the backend
    /// cannot interpret and [`crate::ScmError::TooManyRevisions`] for more than
    /// two revisions.
    fn resolve(&self, revisions: &[String]) -> Result<RevisionSpec>;

    /// Produces the post-processed diff for `spec`, limited to `include_files`
    /// when it is not empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the diff tool fails.
    fn diff(&self, spec: &RevisionSpec, include_files: &[String]) -> Result<DiffResult>;

    fn supports_empty_files(&self) -> bool {
        false
    }

    /// Schedules zero-length files a patch announced but could not create or
    /// remove. Returns whether anything was registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the files cannot be created.
    fn register_empty_files(&self, _markers: &EmptyFileMarkers) -> Result<bool> {
        Ok(false)
    }

    /// # Errors
    ///
    /// Returns [`crate::ScmError::PatchApplication`] if the patch tool reports
    /// a genuine failure.
    fn apply_patch(&self, request: &PatchRequest) -> Result<PatchOutcome> {
        PatchApplier::new(self).apply(request)
    }
}
