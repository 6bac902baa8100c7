use std::fs;
use std::path::PathBuf;

use rbdiff_core::{PatchOutcome, PatchRequest, RepositoryInfo, ScmClient};

use crate::{OperationError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchInput {
    pub patch_file: PathBuf,
    /// Directory the diff was made in, relative to the repository root.
    pub base_dir: Option<String>,
    pub strip: Option<u32>,
}

impl PatchInput {
    #[must_use]
    pub fn new(patch_file: impl Into<PathBuf>) -> Self {
        Self {
            patch_file: patch_file.into(),
            base_dir: None,
            strip: None,
        }
    }
}

/// Applies a patch file to the detected working copy.
pub struct PatchOperation<'a> {
    client: &'a dyn ScmClient,
    repository: &'a RepositoryInfo,
}

impl<'a> PatchOperation<'a> {
    #[must_use]
    pub fn new(client: &'a dyn ScmClient, repository: &'a RepositoryInfo) -> Self {
        Self { client, repository }
    }

    /// # Errors
    ///
    /// Returns [`OperationError::PatchRead`] if the patch file cannot be read,
    /// or the backend's error if the patch does not apply.
    pub fn execute(&self, input: &PatchInput) -> Result<PatchOutcome> {
        let patch = fs::read_to_string(&input.patch_file).map_err(|source| {
            OperationError::PatchRead {
                path: input.patch_file.clone(),
                source,
            }
        })?;

        let mut request = PatchRequest::new(patch).with_base_path(self.repository.base_path());
        if let Some(base_dir) = &input.base_dir {
            request = request.with_base_dir(base_dir.as_str());
        }
        if let Some(strip) = input.strip {
            request = request.with_strip(strip);
        }

        Ok(self.client.apply_patch(&request)?)
    }
}
