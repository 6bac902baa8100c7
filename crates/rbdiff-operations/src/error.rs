use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Scm(#[from] rbdiff_core::ScmError),

    #[error("unknown repository type '{name}', expected one of: {known}")]
    UnknownRepositoryType { name: String, known: String },

    #[error("no {name} repository found")]
    RepositoryTypeNotDetected { name: String },

    #[error("no supported repository found at '{url}'")]
    NoRepositoryAtUrl { url: String },

    #[error("no supported repository found in '{dir}'")]
    NoRepository { dir: PathBuf },

    #[error("the {name} backend does not support parent diffs")]
    ParentDiffsUnsupported { name: String },

    #[error("failed to read patch file '{path}'")]
    PatchRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OperationError>;
