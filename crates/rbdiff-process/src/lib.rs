mod command;
mod error;
mod options;
mod runner;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use command::ToolCommand;
pub use error::ProcessError;
pub use options::ExecOptions;
pub use runner::{CommandRunner, SystemRunner};

pub type Result<T> = std::result::Result<T, ProcessError>;
