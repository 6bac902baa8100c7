use indexmap::IndexMap;
use rbdiff_core::{ClientContext, ScmClient};
use rbdiff_cvs::{CVS_CLIENT_NAME, CvsClient};
use rbdiff_svn::{SVN_CLIENT_NAME, SvnClient};

pub type ClientFactory = Box<dyn Fn(ClientContext) -> Box<dyn ScmClient> + Send + Sync>;

/// Backends by registry key, tried in registration order when scanning.
#[derive(Default)]
pub struct ClientRegistry {
    factories: IndexMap<String, ClientFactory>,
}

impl ClientRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subversion, then CVS.
    #[must_use]
    pub fn with_builtin() -> Self {
        Self::new()
            .with_client(SVN_CLIENT_NAME, |ctx| Box::new(SvnClient::new(ctx)))
            .with_client(CVS_CLIENT_NAME, |ctx| Box::new(CvsClient::new(ctx)))
    }

    /// Registers `factory` under `name`, replacing any earlier entry.
    #[must_use]
    pub fn with_client<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(ClientContext) -> Box<dyn ScmClient> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    #[must_use]
    pub fn create(&self, name: &str, ctx: ClientContext) -> Option<Box<dyn ScmClient>> {
        self.factories.get(name).map(|factory| factory(ctx))
    }
}
