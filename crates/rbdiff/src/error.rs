use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Operation(#[from] rbdiff_operations::OperationError),

    #[error(transparent)]
    Config(#[from] rbdiff_config::ConfigError),

    #[error("failed to determine the current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to serialize output")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
