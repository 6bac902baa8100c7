mod diff;
mod list_repo_types;
mod patch;
mod resolve;

pub use diff::{DiffInput, DiffOperation, DiffOutput};
pub use list_repo_types::{ListRepoTypesOperation, RepoTypeEntry};
pub use patch::{PatchInput, PatchOperation};
pub use resolve::ResolveOperation;
