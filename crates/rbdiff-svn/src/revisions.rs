use rbdiff_core::{
    ClientContext, ResolutionError, Result, Revision, RevisionSpec, ScmError, expand_range_token,
};
use rbdiff_process::{ExecOptions, ToolCommand};
use tracing::debug;

/// Turns user revision tokens into a [`RevisionSpec`] for Subversion.
pub struct RevisionResolver<'a> {
    ctx: &'a ClientContext,
}

impl<'a> RevisionResolver<'a> {
    #[must_use]
    pub fn new(ctx: &'a ClientContext) -> Self {
        Self { ctx }
    }

    /// # Errors
    ///
    /// Returns [`ScmError::InvalidRevisionSpec`] when a token is neither a
    /// revision nor a changelist and [`ScmError::TooManyRevisions`] for more
    /// than two revisions.
    pub fn resolve(&self, revisions: &[String]) -> Result<RevisionSpec> {
        let tokens = expand_range_token(revisions);

        match tokens.as_slice() {
            [] => Ok(RevisionSpec::working_copy()),
            [token] => self.resolve_single(token),
            [base, tip] => {
                let invalid = |source| {
                    ScmError::unresolved(
                        format!("Could not parse specified revisions: {base}, {tip}"),
                        source,
                    )
                };
                let base_revision = self.lookup_revision(base).map_err(invalid)?;
                let tip_revision = self.lookup_revision(tip).map_err(invalid)?;
                Ok(RevisionSpec::new(
                    Revision::concrete(base_revision.to_string()),
                    Revision::concrete(tip_revision.to_string()),
                ))
            }
            _ => Err(ScmError::TooManyRevisions),
        }
    }

    fn resolve_single(&self, token: &str) -> Result<RevisionSpec> {
        let revision_error = match self.lookup_revision(token) {
            Ok(0) => {
                return Err(ScmError::unresolved(
                    format!("Revision {token} is the start of history and cannot be diffed alone"),
                    ResolutionError::NoPredecessor(token.to_string()),
                ));
            }
            Ok(revision) => {
                return Ok(RevisionSpec::new(
                    Revision::concrete((revision - 1).to_string()),
                    Revision::concrete(revision.to_string()),
                ));
            }
            Err(err) => err,
        };
        debug!("'{token}' is not a revision ({revision_error}), trying changelists");

        match self.lookup_changelist(token) {
            Ok(()) => Ok(RevisionSpec::new(
                Revision::base(),
                Revision::Changelist(token.to_string()),
            )),
            Err(source) => Err(ScmError::unresolved(
                format!("\"{token}\" does not appear to be a valid revision or changelist name"),
                source,
            )),
        }
    }

    /// Asks `svn log` for the single revision `token` names.
    fn lookup_revision(&self, token: &str) -> std::result::Result<u64, ResolutionError> {
        let mut command = ToolCommand::new("svn").args(["log", "-r", token, "-l", "1", "--xml"]);
        if let Some(url) = self.ctx.repository_url() {
            command = command.arg(url);
        }

        let not_found = || ResolutionError::RevisionNotFound(token.to_string());
        let log = self
            .ctx
            .run(command, &ExecOptions::lookup().without_stderr())
            .ok()
            .flatten()
            .ok_or_else(not_found)?;

        let document = roxmltree::Document::parse(&log).map_err(|_| not_found())?;
        document
            .root_element()
            .children()
            .find(|node| node.has_tag_name("logentry"))
            .and_then(|entry| entry.attribute("revision"))
            .and_then(|revision| revision.parse().ok())
            .ok_or_else(not_found)
    }

    /// Checks that `name` is a changelist in the working copy.
    fn lookup_changelist(&self, name: &str) -> std::result::Result<(), ResolutionError> {
        if self.ctx.repository_url().is_some() {
            return Err(ResolutionError::ChangelistNeedsWorkingCopy(name.to_string()));
        }

        let command =
            ToolCommand::new("svn").args(["status", "--cl", name, "--ignore-externals", "--xml"]);
        let not_found = || ResolutionError::ChangelistNotFound(name.to_string());
        let status = self
            .ctx
            .run(command, &ExecOptions::lookup().without_stderr())
            .ok()
            .flatten()
            .ok_or_else(not_found)?;

        let document = roxmltree::Document::parse(&status).map_err(|_| not_found())?;
        document
            .root_element()
            .children()
            .any(|node| node.has_tag_name("changelist"))
            .then_some(())
            .ok_or_else(not_found)
    }
}
