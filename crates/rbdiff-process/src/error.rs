use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to execute command '{command}'")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command '{command}' failed\n{output}")]
    Failed {
        command: String,
        code: Option<i32>,
        output: String,
    },
}

impl ProcessError {
    #[must_use]
    pub fn command(&self) -> &str {
        match self {
            Self::Spawn { command, .. } | Self::Failed { command, .. } => command,
        }
    }
}
