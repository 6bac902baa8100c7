use std::sync::{Arc, Mutex};

use rbdiff_core::{
    ClientContext, DiffResult, RepositoryInfo, Result, Revision, RevisionSpec, ScmClient,
    ScmError,
};
use rbdiff_process::testing::ScriptedRunner;

pub fn context() -> ClientContext {
    ClientContext::new(Arc::new(ScriptedRunner::new()), "/work")
}

/// Backend double with canned detection, resolution and diff results.
pub struct MockClient {
    name: &'static str,
    ctx: ClientContext,
    repository: Option<RepositoryInfo>,
    fail_detection: bool,
    diff: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl MockClient {
    pub fn new(name: &'static str, ctx: ClientContext) -> Self {
        Self {
            name,
            ctx,
            repository: None,
            fail_detection: false,
            diff: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_repository(mut self, repository: RepositoryInfo) -> Self {
        self.repository = Some(repository);
        self
    }

    #[must_use]
    pub fn with_failing_detection(mut self) -> Self {
        self.fail_detection = true;
        self
    }

    #[must_use]
    pub fn with_diff(mut self, diff: &str) -> Self {
        self.diff = Some(diff.to_string());
        self
    }

    /// # Panics
    ///
    /// Panics if the call log mutex is poisoned.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("mock call log poisoned").push(call);
    }
}

impl ScmClient for MockClient {
    fn name(&self) -> &'static str {
        self.name
    }

    fn context(&self) -> &ClientContext {
        &self.ctx
    }

    fn detect(&self) -> Result<Option<RepositoryInfo>> {
        if self.fail_detection {
            return Err(ScmError::RepositoryNotFound);
        }
        Ok(self.repository.clone())
    }

    fn resolve(&self, revisions: &[String]) -> Result<RevisionSpec> {
        self.record(format!("resolve {}", revisions.join(" ")));
        match revisions {
            [] => Ok(RevisionSpec::working_copy()),
            [base, tip] => Ok(RevisionSpec::new(
                Revision::concrete(base.as_str()),
                Revision::concrete(tip.as_str()),
            )),
            _ => Err(ScmError::TooManyRevisions),
        }
    }

    fn diff(&self, spec: &RevisionSpec, include_files: &[String]) -> Result<DiffResult> {
        self.record(format!(
            "diff {}..{} {}",
            spec.base,
            spec.tip,
            include_files.join(" ")
        ));
        Ok(DiffResult::new(self.diff.clone()))
    }
}

pub fn detected(
    name: &'static str,
) -> impl Fn(ClientContext) -> Box<dyn ScmClient> + Send + Sync + 'static {
    move |ctx| -> Box<dyn ScmClient> {
        Box::new(MockClient::new(name, ctx).with_repository(RepositoryInfo::new("/repo", "/")))
    }
}

pub fn undetected(
    name: &'static str,
) -> impl Fn(ClientContext) -> Box<dyn ScmClient> + Send + Sync + 'static {
    move |ctx| -> Box<dyn ScmClient> { Box::new(MockClient::new(name, ctx)) }
}

pub fn failing(
    name: &'static str,
) -> impl Fn(ClientContext) -> Box<dyn ScmClient> + Send + Sync + 'static {
    move |ctx| -> Box<dyn ScmClient> { Box::new(MockClient::new(name, ctx).with_failing_detection()) }
}
