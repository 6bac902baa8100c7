use std::path::PathBuf;
use std::sync::Arc;

use rbdiff_config::{Config, load_capabilities};
use rbdiff_core::ClientContext;
use rbdiff_operations::{ClientRegistry, DetectedClient, ScanRequest, scan_usable_client};
use rbdiff_process::SystemRunner;

use crate::error::{CliError, Result};

/// Flags shared by every command.
#[derive(Debug, Clone, Default)]
pub(crate) struct GlobalArgs {
    pub(crate) path: Option<PathBuf>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) capabilities: Option<PathBuf>,
    pub(crate) repository_type: Option<String>,
    pub(crate) repository_url: Option<String>,
    pub(crate) show_copies_as_adds: Option<bool>,
}

/// Settings merged from the config file and flags, with the backend
/// registry and the context handed to backends.
pub(crate) struct Environment {
    pub(crate) config: Config,
    pub(crate) registry: ClientRegistry,
    pub(crate) context: ClientContext,
}

impl Environment {
    pub(crate) fn load(args: GlobalArgs) -> Result<Self> {
        let working_dir = match args.path {
            Some(path) => path,
            None => std::env::current_dir().map_err(CliError::CurrentDir)?,
        };

        let mut config = match &args.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(repository_type) = args.repository_type {
            config = config.with_repository_type(repository_type);
        }
        if let Some(url) = args.repository_url {
            config = config.with_repository_url(url);
        }
        if let Some(show) = args.show_copies_as_adds {
            config = config.with_show_copies_as_adds(show);
        }
        if let Some(path) = &args.capabilities {
            config = config.with_capabilities(load_capabilities(path)?);
        }

        let mut context = ClientContext::new(Arc::new(SystemRunner::new()), working_dir)
            .with_options(config.client_options());
        if let Some(capabilities) = config.capabilities() {
            context = context.with_capabilities(capabilities.clone());
        }

        Ok(Self {
            config,
            registry: ClientRegistry::with_builtin(),
            context,
        })
    }

    pub(crate) fn scan(&self, parent_diffs: bool) -> Result<DetectedClient> {
        let mut request = ScanRequest::new().with_parent_diffs(parent_diffs);
        if let Some(repository_type) = self.config.repository_type() {
            request = request.with_repository_type(repository_type);
        }
        Ok(scan_usable_client(&self.registry, &self.context, &request)?)
    }
}
