use std::io::Write;

use rbdiff_diff::{EmptyFileMarkers, strip_paths};
use rbdiff_process::{ExecOptions, ToolCommand};
use tracing::debug;

use crate::{Result, ScmClient, ScmError};

/// What `patch` prints when its input has no hunks at all, which is the case
/// for a patch that only adds or deletes empty files. Matched literally, so a
/// patch tool with different wording is not recognized.
pub const GARBAGE_DIAGNOSTIC: &str = "patch: **** Only garbage was found in the patch input.\n";

const DIAGNOSTIC_PREFIX: &str = "patch: **** ";

/// Exit code `patch` uses both for trouble and for garbage-only input.
const PATCH_TROUBLE_EXIT_CODE: i32 = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchRequest {
    pub patch: String,
    /// Repository base path the patch was made against.
    pub base_path: Option<String>,
    /// Base path of the working copy the patch is applied to.
    pub base_dir: Option<String>,
    /// Explicit `-pN`, used as-is when present.
    pub strip_override: Option<u32>,
}

impl PatchRequest {
    #[must_use]
    pub fn new(patch: impl Into<String>) -> Self {
        Self {
            patch: patch.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<String>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    #[must_use]
    pub fn with_strip(mut self, strip: u32) -> Self {
        self.strip_override = Some(strip);
        self
    }

    /// The `-pN` for this request; `None` applies paths as they are.
    #[must_use]
    pub fn strip_count(&self) -> Option<u32> {
        if self.strip_override.is_some() {
            return self.strip_override;
        }
        let base_path = self.base_path.as_deref().filter(|p| !p.is_empty())?;
        let base_dir = self.base_dir.as_deref()?;
        if !base_dir.starts_with(base_path) {
            return None;
        }
        let separators = base_path.matches('/').count();
        u32::try_from(separators).ok().map(|n| n + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub strip: Option<u32>,
    pub output: String,
    pub empty_files_registered: bool,
}

/// Applies patches with the generic `patch` tool and hands synthesized empty
/// files to the backend.
pub struct PatchApplier<'a, C: ScmClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ScmClient + ?Sized> PatchApplier<'a, C> {
    #[must_use]
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns [`ScmError::Io`] if the patch cannot be staged in a temporary
    /// file, [`ScmError::Process`] if `patch` cannot run or fails with an
    /// unexpected exit code, and [`ScmError::PatchApplication`] if `patch`
    /// reports a failure.
    pub fn apply(&self, request: &PatchRequest) -> Result<PatchOutcome> {
        let strip = request.strip_count();

        let mut staged = tempfile::Builder::new()
            .prefix("rbdiff-")
            .suffix(".patch")
            .tempfile()
            .map_err(|source| ScmError::Io {
                path: std::env::temp_dir(),
                source,
            })?;
        staged
            .write_all(request.patch.as_bytes())
            .map_err(|source| ScmError::Io {
                path: staged.path().to_path_buf(),
                source,
            })?;

        let mut command = ToolCommand::new("patch");
        if let Some(strip) = strip {
            command = command.arg(format!("-p{strip}"));
        }
        let command = command
            .arg("-i")
            .arg(staged.path().to_string_lossy().into_owned());
        let command_line = command.to_string();

        let output = self
            .client
            .context()
            .run(
                command,
                &ExecOptions::new().ignoring_exit_code(PATCH_TROUBLE_EXIT_CODE),
            )?
            .unwrap_or_default();
        debug!("patch output:\n{output}");

        let garbage_only = output == GARBAGE_DIAGNOSTIC;
        let reported_failure = output
            .lines()
            .any(|line| line.starts_with(DIAGNOSTIC_PREFIX));
        if reported_failure && !garbage_only {
            return Err(ScmError::PatchApplication {
                command: command_line,
                output,
            });
        }

        let mut empty_files_registered = false;
        if self.client.supports_empty_files() {
            let markers = EmptyFileMarkers::scan(&request.patch);
            let markers = EmptyFileMarkers {
                added: strip_paths(&markers.added, strip),
                deleted: strip_paths(&markers.deleted, strip),
            };
            if !markers.is_empty() {
                empty_files_registered = self.client.register_empty_files(&markers)?;
            }

            if garbage_only && !empty_files_registered {
                return Err(ScmError::PatchApplication {
                    command: command_line,
                    output,
                });
            }
        }

        Ok(PatchOutcome {
            strip,
            output,
            empty_files_registered,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rbdiff_process::testing::ScriptedRunner;

    use super::*;
    use crate::{ClientContext, DiffResult, RepositoryInfo, RevisionSpec};

    struct PatchOnlyClient {
        runner: Arc<ScriptedRunner>,
        ctx: ClientContext,
        empty_files: bool,
        registered: Mutex<Vec<EmptyFileMarkers>>,
    }

    impl PatchOnlyClient {
        fn new(runner: ScriptedRunner, empty_files: bool) -> Self {
            let runner = Arc::new(runner);
            Self {
                ctx: ClientContext::new(runner.clone(), "/work"),
                runner,
                empty_files,
                registered: Mutex::new(Vec::new()),
            }
        }
    }

    impl ScmClient for PatchOnlyClient {
        fn name(&self) -> &'static str {
            "patch-only"
        }

        fn context(&self) -> &ClientContext {
            &self.ctx
        }

        fn detect(&self) -> Result<Option<RepositoryInfo>> {
            Ok(None)
        }

        fn resolve(&self, _revisions: &[String]) -> Result<RevisionSpec> {
            Ok(RevisionSpec::working_copy())
        }

        fn diff(&self, _spec: &RevisionSpec, _include_files: &[String]) -> Result<DiffResult> {
            Ok(DiffResult::default())
        }

        fn supports_empty_files(&self) -> bool {
            self.empty_files
        }

        fn register_empty_files(&self, markers: &EmptyFileMarkers) -> Result<bool> {
            self.registered
                .lock()
                .expect("lock poisoned")
                .push(markers.clone());
            Ok(true)
        }
    }

    const EMPTY_ADD_PATCH: &str = "Index: /trunk/sub/empty.txt\t(added)\n\
        ===================================================================\n\
        --- /trunk/sub/empty.txt\t(revision 0)\n\
        +++ /trunk/sub/empty.txt\t(revision 0)\n";

    #[test]
    fn strip_count_from_base_path_prefix() {
        let request = PatchRequest::new("")
            .with_base_path("/trunk/sub")
            .with_base_dir("/trunk/sub");

        assert_eq!(request.strip_count(), Some(3));
    }

    #[test]
    fn strip_override_wins_even_when_zero() {
        let request = PatchRequest::new("")
            .with_base_path("/trunk/sub")
            .with_base_dir("/trunk/sub")
            .with_strip(0);

        assert_eq!(request.strip_count(), Some(0));
    }

    #[test]
    fn no_strip_when_base_dir_is_elsewhere() {
        let request = PatchRequest::new("")
            .with_base_path("/trunk/sub")
            .with_base_dir("/branches/b1");

        assert_eq!(request.strip_count(), None);
        assert_eq!(PatchRequest::new("").strip_count(), None);
    }

    #[test]
    fn successful_patch_passes_strip_flag() -> anyhow::Result<()> {
        let runner = ScriptedRunner::new().with_program_exit("patch", 0, "patching file foo.txt\n");
        let client = PatchOnlyClient::new(runner, false);
        let request = PatchRequest::new("--- foo.txt\n")
            .with_base_path("/trunk")
            .with_base_dir("/trunk");

        let outcome = client.apply_patch(&request)?;

        assert_eq!(outcome.strip, Some(2));
        assert!(!outcome.empty_files_registered);
        let calls = client.runner.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("patch -p2 -i "));
        Ok(())
    }

    #[test]
    fn other_patch_diagnostics_fail() {
        let runner = ScriptedRunner::new()
            .with_program_exit("patch", 2, "patch: **** malformed patch at line 3\n");
        let client = PatchOnlyClient::new(runner, true);

        let result = client.apply_patch(&PatchRequest::new("garbage"));

        assert!(matches!(result, Err(ScmError::PatchApplication { .. })));
    }

    #[test]
    fn diagnostic_after_progress_output_fails() {
        let runner = ScriptedRunner::new().with_program_exit(
            "patch",
            2,
            "patching file a.txt\npatch: **** malformed patch at line 9: junk\n",
        );
        let client = PatchOnlyClient::new(runner, false);

        let result = client.apply_patch(&PatchRequest::new("--- a.txt\n+++ a.txt\njunk\n"));

        let Err(ScmError::PatchApplication { output, .. }) = result else {
            panic!("expected PatchApplication");
        };
        assert!(output.contains("malformed patch at line 9"));
    }

    #[test]
    fn garbage_only_patch_without_empty_files_fails() {
        let runner = ScriptedRunner::new().with_program_exit("patch", 2, GARBAGE_DIAGNOSTIC);
        let client = PatchOnlyClient::new(runner, true);

        let result = client.apply_patch(&PatchRequest::new("not a patch\n"));

        assert!(matches!(result, Err(ScmError::PatchApplication { .. })));
    }

    #[test]
    fn garbage_only_patch_is_accepted_without_empty_file_support() -> anyhow::Result<()> {
        let runner = ScriptedRunner::new().with_program_exit("patch", 2, GARBAGE_DIAGNOSTIC);
        let client = PatchOnlyClient::new(runner, false);

        let outcome = client.apply_patch(&PatchRequest::new(EMPTY_ADD_PATCH))?;

        assert_eq!(outcome.output, GARBAGE_DIAGNOSTIC);
        assert!(client.runner.calls()[0].starts_with("patch -i "));
        Ok(())
    }

    #[test]
    fn empty_files_are_registered_with_stripped_paths() -> anyhow::Result<()> {
        let runner = ScriptedRunner::new().with_program_exit("patch", 2, GARBAGE_DIAGNOSTIC);
        let client = PatchOnlyClient::new(runner, true);
        let request = PatchRequest::new(EMPTY_ADD_PATCH)
            .with_base_path("/trunk/sub")
            .with_base_dir("/trunk/sub");

        let outcome = client.apply_patch(&request)?;

        assert!(outcome.empty_files_registered);
        let registered = client.registered.lock().expect("lock poisoned");
        assert_eq!(registered[0].added, vec!["empty.txt".to_string()]);
        assert!(registered[0].deleted.is_empty());
        Ok(())
    }

    #[test]
    fn unexpected_exit_code_is_process_error() {
        let runner = ScriptedRunner::new().with_program_exit("patch", 1, "1 out of 1 hunk FAILED\n");
        let client = PatchOnlyClient::new(runner, false);

        let result = client.apply_patch(&PatchRequest::new("--- a\n"));

        assert!(matches!(result, Err(ScmError::Process(_))));
    }
}
