use rbdiff_core::ClientContext;
use tracing::debug;

use crate::registry::ClientRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTypeEntry {
    pub name: String,
    pub detected: bool,
}

/// Lists registered backends and whether each recognizes the repository.
pub struct ListRepoTypesOperation<'a> {
    registry: &'a ClientRegistry,
}

impl<'a> ListRepoTypesOperation<'a> {
    #[must_use]
    pub fn new(registry: &'a ClientRegistry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn execute(&self, ctx: &ClientContext) -> Vec<RepoTypeEntry> {
        self.registry
            .names()
            .map(|name| {
                let detected = self
                    .registry
                    .create(name, ctx.clone())
                    .is_some_and(|client| match client.detect() {
                        Ok(found) => found.is_some(),
                        Err(err) => {
                            debug!("{name} detection failed: {err}");
                            false
                        }
                    });
                RepoTypeEntry {
                    name: name.to_string(),
                    detected,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{context, detected, failing, undetected};

    #[test]
    fn marks_detecting_backends() {
        let registry = ClientRegistry::new()
            .with_client("svn", undetected("svn"))
            .with_client("cvs", detected("cvs"))
            .with_client("broken", failing("broken"));

        let entries = ListRepoTypesOperation::new(&registry).execute(&context());

        let summary: Vec<_> = entries.iter().map(|e| (e.name.as_str(), e.detected)).collect();
        assert_eq!(summary, vec![("svn", false), ("cvs", true), ("broken", false)]);
    }
}
