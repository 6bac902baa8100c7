use std::path::PathBuf;

use rbdiff_process::ProcessError;
use thiserror::Error;

/// Why a revision token or changelist name could not be looked up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("revision '{0}' was not found")]
    RevisionNotFound(String),

    #[error("changelist '{0}' was not found")]
    ChangelistNotFound(String),

    #[error("changelist '{0}' cannot be used without a working copy")]
    ChangelistNeedsWorkingCopy(String),

    #[error("revision '{0}' has no predecessor")]
    NoPredecessor(String),
}

#[derive(Debug, Error)]
pub enum ScmError {
    #[error("{message}")]
    InvalidRevisionSpec {
        message: String,
        #[source]
        source: Option<ResolutionError>,
    },

    #[error("too many revisions specified")]
    TooManyRevisions,

    #[error("external tool failed")]
    Process(#[from] ProcessError),

    #[error("failed to apply patch with '{command}'\n{output}")]
    PatchApplication { command: String, output: String },

    #[error(
        "one or more files have history scheduled with commit; \
         pass --svn-show-copies-as-adds to choose how they are sent"
    )]
    HistoryScheduledWithCommit,

    #[error("could not determine repository information")]
    RepositoryNotFound,

    #[error("failed to access '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScmError {
    #[must_use]
    pub fn invalid_revision(message: impl Into<String>) -> Self {
        Self::InvalidRevisionSpec {
            message: message.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn unresolved(message: impl Into<String>, source: ResolutionError) -> Self {
        Self::InvalidRevisionSpec {
            message: message.into(),
            source: Some(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScmError>;
