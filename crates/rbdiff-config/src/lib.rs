mod config;
mod error;

pub use config::{Config, PatchConfig, SvnConfig, load_capabilities};
pub use error::{ConfigError, Result};
