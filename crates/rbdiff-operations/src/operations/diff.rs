use rbdiff_core::{DiffResult, RevisionSpec, ScmClient};
use tracing::debug;

use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffInput {
    pub revisions: Vec<String>,
    pub include_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOutput {
    pub spec: RevisionSpec,
    pub result: DiffResult,
}

impl DiffOutput {
    /// The diff text, or `None` when there is nothing to show.
    #[must_use]
    pub fn diff(&self) -> Option<&str> {
        self.result.diff.as_deref().filter(|diff| !diff.is_empty())
    }
}

/// Resolves the requested revisions, then diffs them.
pub struct DiffOperation<'a> {
    client: &'a dyn ScmClient,
}

impl<'a> DiffOperation<'a> {
    #[must_use]
    pub fn new(client: &'a dyn ScmClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns an error if the revisions cannot be resolved or the backend
    /// fails to produce the diff.
    pub fn execute(&self, input: &DiffInput) -> Result<DiffOutput> {
        let spec = self.client.resolve(&input.revisions)?;
        debug!("Diffing {} against {}", spec.tip, spec.base);
        let result = self.client.diff(&spec, &input.include_files)?;
        Ok(DiffOutput { spec, result })
    }
}
