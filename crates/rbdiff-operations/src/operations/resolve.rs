use rbdiff_core::{RevisionSpec, ScmClient};

use crate::Result;

pub struct ResolveOperation<'a> {
    client: &'a dyn ScmClient,
}

impl<'a> ResolveOperation<'a> {
    #[must_use]
    pub fn new(client: &'a dyn ScmClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns an error if the backend cannot interpret `revisions`.
    pub fn execute(&self, revisions: &[String]) -> Result<RevisionSpec> {
        Ok(self.client.resolve(revisions)?)
    }
}

#[cfg(test)]
mod tests {
    use rbdiff_core::{Revision, ScmError};

    use super::*;
    use crate::OperationError;
    use crate::mocks::{MockClient, context};

    #[test]
    fn returns_backend_resolution() -> anyhow::Result<()> {
        let client = MockClient::new("mock", context());

        let spec = ResolveOperation::new(&client).execute(&["1".to_string(), "2".to_string()])?;

        assert_eq!(spec.base, Revision::concrete("1"));
        assert_eq!(spec.tip, Revision::concrete("2"));
        Ok(())
    }

    #[test]
    fn backend_errors_pass_through() {
        let client = MockClient::new("mock", context());
        let revisions = ["1", "2", "3"].map(String::from);

        let result = ResolveOperation::new(&client).execute(&revisions);

        assert!(matches!(
            result,
            Err(OperationError::Scm(ScmError::TooManyRevisions))
        ));
    }
}
