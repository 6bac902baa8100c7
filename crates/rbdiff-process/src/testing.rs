use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::Mutex;

use crate::runner::settle;
use crate::{CommandRunner, ExecOptions, ProcessError, Result, ToolCommand};

#[derive(Debug, Clone)]
enum ScriptedResponse {
    Exit { code: i32, output: String },
    SpawnFailure,
}

/// A [`CommandRunner`] answering from canned responses keyed by command line.
///
/// Several responses for one command line are handed out in order; the last
/// one repeats. Commands without a response for their exact line fall back to
/// a response registered for their program, and otherwise exit with code 1.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Mutex<HashMap<String, VecDeque<ScriptedResponse>>>,
    program_responses: Mutex<HashMap<String, ScriptedResponse>>,
    calls: Mutex<Vec<ToolCommand>>,
}

impl ScriptedRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_output(self, command_line: &str, output: &str) -> Self {
        self.with_exit(command_line, 0, output)
    }

    /// # Panics
    ///
    /// Panics if the response lock is poisoned.
    #[must_use]
    pub fn with_exit(self, command_line: &str, code: i32, output: &str) -> Self {
        self.push(
            command_line,
            ScriptedResponse::Exit {
                code,
                output: output.to_string(),
            },
        );
        self
    }

    /// Answers every otherwise unscripted invocation of `program`, for
    /// command lines that are not known up front (temporary file names).
    ///
    /// # Panics
    ///
    /// Panics if the response lock is poisoned.
    #[must_use]
    pub fn with_program_exit(self, program: &str, code: i32, output: &str) -> Self {
        self.program_responses
            .lock()
            .expect("lock poisoned")
            .insert(
                program.to_string(),
                ScriptedResponse::Exit {
                    code,
                    output: output.to_string(),
                },
            );
        self
    }

    /// # Panics
    ///
    /// Panics if the response lock is poisoned.
    #[must_use]
    pub fn with_spawn_failure(self, command_line: &str) -> Self {
        self.push(command_line, ScriptedResponse::SpawnFailure);
        self
    }

    /// Command lines run so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the call lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.commands().iter().map(ToString::to_string).collect()
    }

    /// # Panics
    ///
    /// Panics if the call lock is poisoned.
    #[must_use]
    pub fn commands(&self) -> Vec<ToolCommand> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    fn push(&self, command_line: &str, response: ScriptedResponse) {
        self.responses
            .lock()
            .expect("lock poisoned")
            .entry(command_line.to_string())
            .or_default()
            .push_back(response);
    }

    fn next_response(&self, command: &ToolCommand) -> Option<ScriptedResponse> {
        let mut responses = self.responses.lock().expect("lock poisoned");
        if let Some(queue) = responses.get_mut(&command.to_string()) {
            return if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            };
        }
        drop(responses);

        self.program_responses
            .lock()
            .expect("lock poisoned")
            .get(command.program())
            .cloned()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &ToolCommand, options: &ExecOptions) -> Result<Option<String>> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .push(command.clone());

        let command_line = command.to_string();
        match self.next_response(command) {
            Some(ScriptedResponse::Exit { code, output }) => {
                settle(command, options, Some(code), output)
            }
            Some(ScriptedResponse::SpawnFailure) => {
                if options.ignores_errors() {
                    return Ok(None);
                }
                Err(ProcessError::Spawn {
                    command: command_line,
                    source: io::Error::new(io::ErrorKind::NotFound, "scripted spawn failure"),
                })
            }
            None => settle(
                command,
                options,
                Some(1),
                format!("unscripted command: {command_line}\n"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_scripted_output() {
        let runner = ScriptedRunner::new().with_output("svn info", "URL: x\n");

        let output = runner
            .run(&ToolCommand::new("svn").arg("info"), &ExecOptions::new())
            .expect("scripted command succeeds");

        assert_eq!(output.as_deref(), Some("URL: x\n"));
        assert_eq!(runner.calls(), vec!["svn info".to_string()]);
    }

    #[test]
    fn hands_out_responses_in_order_and_repeats_last() {
        let runner = ScriptedRunner::new()
            .with_output("cvs diff", "first")
            .with_output("cvs diff", "second");
        let cmd = ToolCommand::new("cvs").arg("diff");

        let outputs: Vec<_> = (0..3)
            .map(|_| {
                runner
                    .run(&cmd, &ExecOptions::new())
                    .expect("scripted command succeeds")
            })
            .collect();

        assert_eq!(
            outputs,
            vec![
                Some("first".to_string()),
                Some("second".to_string()),
                Some("second".to_string())
            ]
        );
    }

    #[test]
    fn unscripted_commands_fail() {
        let runner = ScriptedRunner::new();

        let result = runner.run(&ToolCommand::new("svn"), &ExecOptions::new());

        assert!(matches!(result, Err(ProcessError::Failed { .. })));
    }

    #[test]
    fn program_response_covers_unknown_command_lines() {
        let runner = ScriptedRunner::new()
            .with_output("patch -p0 -i known.diff", "known")
            .with_program_exit("patch", 2, "fallback");

        let known = runner
            .run(
                &ToolCommand::new("patch").args(["-p0", "-i", "known.diff"]),
                &ExecOptions::new(),
            )
            .expect("scripted command succeeds");
        let other = runner
            .run(
                &ToolCommand::new("patch").args(["-i", "/tmp/random.diff"]),
                &ExecOptions::new().ignoring_exit_code(2),
            )
            .expect("exit code 2 is ignored");

        assert_eq!(known.as_deref(), Some("known"));
        assert_eq!(other.as_deref(), Some("fallback"));
    }

    #[test]
    fn spawn_failure_honours_ignore_errors() {
        let runner = ScriptedRunner::new().with_spawn_failure("patch");
        let cmd = ToolCommand::new("patch");

        assert!(matches!(
            runner.run(&cmd, &ExecOptions::new()),
            Err(ProcessError::Spawn { .. })
        ));
        assert!(
            runner
                .run(&cmd, &ExecOptions::lookup())
                .expect("errors are ignored")
                .is_none()
        );
    }
}
