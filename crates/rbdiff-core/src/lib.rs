mod capabilities;
mod client;
pub mod error;
mod patch;
mod range;
pub mod types;

pub use capabilities::{Capabilities, EMPTY_FILES_CAPABILITY};
pub use client::{ClientContext, ClientOptions, ScmClient};
pub use error::{ResolutionError, Result, ScmError};
pub use patch::{GARBAGE_DIAGNOSTIC, PatchApplier, PatchOutcome, PatchRequest};
pub use range::expand_range_token;
pub use types::*;
