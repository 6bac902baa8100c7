//! CVS support through the `cvs` command line client.

mod client;
mod root;

pub use client::{CVS_CLIENT_NAME, CvsClient};
pub use root::{CVS_ROOT_FILE, repository_path};
