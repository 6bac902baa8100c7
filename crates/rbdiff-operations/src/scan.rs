use rbdiff_core::{ClientContext, RepositoryInfo, ScmClient};
use tracing::{debug, warn};

use crate::error::{OperationError, Result};
use crate::registry::ClientRegistry;

/// What the caller asks of the backend it wants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanRequest {
    repository_type: Option<String>,
    require_parent_diffs: bool,
}

impl ScanRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only try the backend registered as `name`.
    #[must_use]
    pub fn with_repository_type(mut self, name: impl Into<String>) -> Self {
        self.repository_type = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_parent_diffs(mut self, required: bool) -> Self {
        self.require_parent_diffs = required;
        self
    }
}

/// A backend that recognized the repository, with what it detected.
pub struct DetectedClient {
    pub client: Box<dyn ScmClient>,
    pub repository: RepositoryInfo,
}

/// Finds the backend for the repository at the context's working directory
/// or URL.
///
/// # Errors
///
/// Returns [`OperationError::UnknownRepositoryType`] for an unregistered
/// requested type, [`OperationError::RepositoryTypeNotDetected`] when the
/// requested backend does not recognize the repository,
/// [`OperationError::NoRepositoryAtUrl`] or [`OperationError::NoRepository`]
/// when no backend does, and [`OperationError::ParentDiffsUnsupported`] when
/// parent diffs were asked for but the backend cannot produce them.
pub fn scan_usable_client(
    registry: &ClientRegistry,
    ctx: &ClientContext,
    request: &ScanRequest,
) -> Result<DetectedClient> {
    let detected = match request.repository_type.as_deref() {
        Some(name) => {
            let client = registry.create(name, ctx.clone()).ok_or_else(|| {
                OperationError::UnknownRepositoryType {
                    name: name.to_string(),
                    known: registry.names().collect::<Vec<_>>().join(", "),
                }
            })?;
            match client.detect()? {
                Some(repository) => DetectedClient { client, repository },
                None => {
                    return Err(OperationError::RepositoryTypeNotDetected {
                        name: name.to_string(),
                    });
                }
            }
        }
        None => scan_all(registry, ctx)?,
    };

    debug!(
        "Using {} backend. {}",
        detected.client.name(),
        detected.repository
    );

    if request.require_parent_diffs && !detected.repository.supports_parent_diffs() {
        return Err(OperationError::ParentDiffsUnsupported {
            name: detected.client.name().to_string(),
        });
    }

    Ok(detected)
}

fn scan_all(registry: &ClientRegistry, ctx: &ClientContext) -> Result<DetectedClient> {
    for name in registry.names() {
        let Some(client) = registry.create(name, ctx.clone()) else {
            continue;
        };
        match client.detect() {
            Ok(Some(repository)) => return Ok(DetectedClient { client, repository }),
            Ok(None) => debug!("{name} did not recognize the repository"),
            Err(err) => warn!("{name} detection failed: {err}"),
        }
    }

    Err(match ctx.repository_url() {
        Some(url) => OperationError::NoRepositoryAtUrl {
            url: url.to_string(),
        },
        None => OperationError::NoRepository {
            dir: ctx.working_dir().to_path_buf(),
        },
    })
}

#[cfg(test)]
mod tests {
    use rbdiff_core::ClientOptions;

    use super::*;
    use crate::mocks::{context, detected, failing, undetected};

    fn registry() -> ClientRegistry {
        ClientRegistry::new()
            .with_client("first", undetected("first"))
            .with_client("second", detected("second"))
            .with_client("third", detected("third"))
    }

    #[test]
    fn picks_first_detecting_backend() -> anyhow::Result<()> {
        let found = scan_usable_client(&registry(), &context(), &ScanRequest::new())?;

        assert_eq!(found.client.name(), "second");
        assert_eq!(found.repository.base_path(), "/");
        Ok(())
    }

    #[test]
    fn requested_backend_is_used() -> anyhow::Result<()> {
        let request = ScanRequest::new().with_repository_type("third");

        let found = scan_usable_client(&registry(), &context(), &request)?;

        assert_eq!(found.client.name(), "third");
        Ok(())
    }

    #[test]
    fn unknown_type_lists_known_types() {
        let request = ScanRequest::new().with_repository_type("git");

        let result = scan_usable_client(&registry(), &context(), &request);

        let Err(OperationError::UnknownRepositoryType { name, known }) = result else {
            panic!("expected UnknownRepositoryType");
        };
        assert_eq!(name, "git");
        assert_eq!(known, "first, second, third");
    }

    #[test]
    fn requested_type_must_detect() {
        let request = ScanRequest::new().with_repository_type("first");

        let result = scan_usable_client(&registry(), &context(), &request);

        assert!(matches!(
            result,
            Err(OperationError::RepositoryTypeNotDetected { name }) if name == "first"
        ));
    }

    #[test]
    fn failing_detection_moves_on() -> anyhow::Result<()> {
        let registry = ClientRegistry::new()
            .with_client("broken", failing("broken"))
            .with_client("ok", detected("ok"));

        let found = scan_usable_client(&registry, &context(), &ScanRequest::new())?;

        assert_eq!(found.client.name(), "ok");
        Ok(())
    }

    #[test]
    fn nothing_detected_in_directory() {
        let registry = ClientRegistry::new().with_client("first", undetected("first"));

        let result = scan_usable_client(&registry, &context(), &ScanRequest::new());

        assert!(matches!(result, Err(OperationError::NoRepository { dir }) if dir.ends_with("work")));
    }

    #[test]
    fn nothing_detected_at_url() {
        let registry = ClientRegistry::new().with_client("first", undetected("first"));
        let ctx = context().with_options(ClientOptions {
            repository_url: Some("svn://example/repo".to_string()),
            ..ClientOptions::default()
        });

        let result = scan_usable_client(&registry, &ctx, &ScanRequest::new());

        assert!(matches!(
            result,
            Err(OperationError::NoRepositoryAtUrl { url }) if url == "svn://example/repo"
        ));
    }

    #[test]
    fn parent_diffs_need_backend_support() {
        let request = ScanRequest::new().with_parent_diffs(true);

        let result = scan_usable_client(&registry(), &context(), &request);

        assert!(matches!(
            result,
            Err(OperationError::ParentDiffsUnsupported { name }) if name == "second"
        ));
    }
}
