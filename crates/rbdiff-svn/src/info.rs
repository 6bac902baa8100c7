use std::borrow::Cow;

use indexmap::IndexMap;
use rbdiff_core::ClientContext;
use rbdiff_process::{ExecOptions, ToolCommand};

/// Parsed `svn info` output: `Key: value` pairs in the order printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvnInfo(IndexMap<String, String>);

impl SvnInfo {
    #[must_use]
    pub fn parse(output: &str) -> Self {
        let entries = output
            .lines()
            .filter_map(|line| line.trim().split_once(": "))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self(entries)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.get("URL")
    }

    #[must_use]
    pub fn repository_root(&self) -> Option<&str> {
        self.get("Repository Root")
    }

    #[must_use]
    pub fn repository_uuid(&self) -> Option<&str> {
        self.get("Repository UUID")
    }

    #[must_use]
    pub fn copied_from_url(&self) -> Option<&str> {
        self.get("Copied From URL")
    }

    #[must_use]
    pub fn schedule(&self) -> Option<&str> {
        self.get("Schedule")
    }

    #[must_use]
    pub fn revision(&self) -> Option<&str> {
        self.get("Revision")
    }

    /// The part of `URL` below `Repository Root`, percent-decoded.
    #[must_use]
    pub fn repository_relative_url(&self) -> Option<String> {
        let root = self.repository_root()?;
        let relative = self.url()?.strip_prefix(root)?;
        Some(unquote(relative))
    }

    #[cfg(test)]
    pub(crate) fn with(mut self, key: &str, value: &str) -> Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }
}

/// Per-file metadata lookups. Failures yield `None`, never an error.
pub trait InfoSource {
    fn info(&self, path: &str) -> Option<SvnInfo>;
}

/// Looks files up with `svn info` in the client's working directory.
pub struct SvnInfoLookup<'a> {
    ctx: &'a ClientContext,
}

impl<'a> SvnInfoLookup<'a> {
    #[must_use]
    pub fn new(ctx: &'a ClientContext) -> Self {
        Self { ctx }
    }
}

impl InfoSource for SvnInfoLookup<'_> {
    fn info(&self, path: &str) -> Option<SvnInfo> {
        let command = ToolCommand::new("svn")
            .arg("info")
            .arg(peg_safe_path(path).into_owned());
        let output = self
            .ctx
            .run(command, &ExecOptions::lookup().without_stderr())
            .ok()
            .flatten()?;
        Some(SvnInfo::parse(&output))
    }
}

/// Subversion reads `name@rev` as a peg revision, so a path containing `@`
/// needs a trailing `@` to be taken literally.
#[must_use]
pub fn peg_safe_path(path: &str) -> Cow<'_, str> {
    if path.contains('@') && !path.ends_with('@') {
        Cow::Owned(format!("{path}@"))
    } else {
        Cow::Borrowed(path)
    }
}

#[must_use]
pub fn unquote(text: &str) -> String {
    percent_encoding::percent_decode_str(text)
        .decode_utf8_lossy()
        .into_owned()
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rbdiff_process::testing::ScriptedRunner;

    use super::*;

    const INFO_OUTPUT: &str = "\
Path: foo.txt
Name: foo.txt
URL: https://svn.example.com/repo/trunk/my%20dir/foo.txt
Relative URL: ^/trunk/my%20dir/foo.txt
Repository Root: https://svn.example.com/repo
Repository UUID: 0f4e3d2c-1b0a-4f9e-8d7c-6b5a4f3e2d1c
Revision: 12
Node Kind: file
Schedule: normal
";

    #[test]
    fn parses_key_value_lines() {
        let info = SvnInfo::parse(INFO_OUTPUT);

        assert_eq!(info.revision(), Some("12"));
        assert_eq!(info.schedule(), Some("normal"));
        assert_eq!(
            info.repository_uuid(),
            Some("0f4e3d2c-1b0a-4f9e-8d7c-6b5a4f3e2d1c")
        );
        assert!(info.copied_from_url().is_none());
    }

    #[test]
    fn relative_url_is_decoded() {
        let info = SvnInfo::parse(INFO_OUTPUT);

        assert_eq!(
            info.repository_relative_url().as_deref(),
            Some("/trunk/my dir/foo.txt")
        );
    }

    #[test]
    fn peg_safe_path_appends_at_sign() {
        assert_eq!(peg_safe_path("image@2x.png"), "image@2x.png@");
        assert_eq!(peg_safe_path("image@2x.png@"), "image@2x.png@");
        assert_eq!(peg_safe_path("plain.txt"), "plain.txt");
    }

    #[test]
    fn lookup_runs_svn_info() {
        let runner = Arc::new(ScriptedRunner::new().with_output("svn info image@2x.png@", INFO_OUTPUT));
        let ctx = ClientContext::new(runner.clone(), "/work");

        let info = SvnInfoLookup::new(&ctx).info("image@2x.png");

        assert_eq!(info.and_then(|i| i.revision().map(str::to_owned)), Some("12".to_string()));
        assert_eq!(runner.calls(), vec!["svn info image@2x.png@".to_string()]);
    }

    #[test]
    fn failed_lookup_is_none() {
        let ctx = ClientContext::new(Arc::new(ScriptedRunner::new()), "/work");

        assert!(SvnInfoLookup::new(&ctx).info("missing.txt").is_none());
    }
}
