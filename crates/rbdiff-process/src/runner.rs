use std::process::{Command, Stdio};

use tracing::debug;

use crate::{ExecOptions, ProcessError, Result, ToolCommand};

/// Locale forced on every tool so diagnostics stay parseable.
const TOOL_LOCALE: &str = "en_US.UTF-8";

/// Runs external tools and interprets their exit status.
///
/// Returns `Ok(None)` only when the tool failed, the failure was ignored by
/// `options`, and `options` asked for `None` on ignored failures.
pub trait CommandRunner: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ProcessError::Spawn`] if the tool cannot be started and
    /// [`ProcessError::Failed`] if it exits unsuccessfully without the failure
    /// being ignored by `options`.
    fn run(&self, command: &ToolCommand, options: &ExecOptions) -> Result<Option<String>>;
}

/// Runs tools as child processes of this process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ToolCommand, options: &ExecOptions) -> Result<Option<String>> {
        debug!("Running: {command}");

        let mut cmd = Command::new(command.program());
        cmd.args(command.arguments())
            .env("LC_ALL", TOOL_LOCALE)
            .env("LANGUAGE", TOOL_LOCALE)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = command.working_dir() {
            cmd.current_dir(dir);
        }

        let output = match cmd.output() {
            Ok(output) => output,
            Err(source) => {
                if options.ignores_errors() {
                    debug!("Could not start '{command}': {source}");
                    return Ok(None);
                }
                return Err(ProcessError::Spawn {
                    command: command.to_string(),
                    source,
                });
            }
        };

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        if !options.suppresses_stderr() {
            text.push_str(&String::from_utf8_lossy(&output.stderr));
        }

        settle(command, options, output.status.code(), text)
    }
}

/// Applies `options` to a finished tool run.
pub(crate) fn settle(
    command: &ToolCommand,
    options: &ExecOptions,
    code: Option<i32>,
    output: String,
) -> Result<Option<String>> {
    if code == Some(0) {
        return Ok(Some(output));
    }

    if !options.ignores_exit_code(code) {
        return Err(ProcessError::Failed {
            command: command.to_string(),
            code,
            output,
        });
    }

    debug!("Ignoring exit status {code:?} of '{command}'");
    if options.returns_none_on_ignored_error() {
        Ok(None)
    } else {
        Ok(Some(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo() -> ToolCommand {
        ToolCommand::new("echo").arg("hi")
    }

    #[test]
    fn settle_returns_output_on_success() {
        let result = settle(&echo(), &ExecOptions::new(), Some(0), "hi\n".to_string())
            .expect("success should settle");

        assert_eq!(result.as_deref(), Some("hi\n"));
    }

    #[test]
    fn settle_fails_on_unexpected_exit_code() {
        let result = settle(&echo(), &ExecOptions::new(), Some(1), "boom".to_string());

        let Err(ProcessError::Failed { code, output, .. }) = result else {
            panic!("expected Failed error");
        };
        assert_eq!(code, Some(1));
        assert_eq!(output, "boom");
    }

    #[test]
    fn settle_keeps_output_for_ignored_exit_code() {
        let options = ExecOptions::new().ignoring_exit_code(1);

        let result = settle(&echo(), &options, Some(1), "diff".to_string())
            .expect("exit code 1 is ignored");

        assert_eq!(result.as_deref(), Some("diff"));
    }

    #[test]
    fn settle_returns_none_when_requested() {
        let result = settle(&echo(), &ExecOptions::lookup(), Some(1), "err".to_string())
            .expect("errors are ignored");

        assert!(result.is_none());
    }

    #[test]
    fn settle_treats_signal_as_failure() {
        let result = settle(&echo(), &ExecOptions::new(), None, String::new());

        assert!(matches!(result, Err(ProcessError::Failed { code: None, .. })));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let cmd = ToolCommand::new("rbdiff-definitely-not-a-real-tool");

        let result = SystemRunner::new().run(&cmd, &ExecOptions::new());

        assert!(matches!(result, Err(ProcessError::Spawn { .. })));
    }

    #[test]
    fn missing_program_is_none_when_errors_ignored() {
        let cmd = ToolCommand::new("rbdiff-definitely-not-a-real-tool");

        let result = SystemRunner::new()
            .run(&cmd, &ExecOptions::lookup())
            .expect("errors are ignored");

        assert!(result.is_none());
    }
}
