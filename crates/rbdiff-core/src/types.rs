use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

/// Text form of [`Revision::WorkingCopy`].
pub const WORKING_COPY_SENTINEL: &str = "--rbtools-working-copy";

/// Text prefix of [`Revision::Changelist`]; the changelist name follows it.
pub const CHANGELIST_SENTINEL_PREFIX: &str = "--rbtools-changelist:";

/// The keyword for the revision a working copy was last updated to.
pub const BASE_KEYWORD: &str = "BASE";

/// Where a repository lives. Some tools report several plausible roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RepositoryPath {
    Single(String),
    Candidates(Vec<String>),
}

impl From<String> for RepositoryPath {
    fn from(path: String) -> Self {
        Self::Single(path)
    }
}

impl From<&str> for RepositoryPath {
    fn from(path: &str) -> Self {
        Self::Single(path.to_string())
    }
}

impl From<Vec<String>> for RepositoryPath {
    fn from(paths: Vec<String>) -> Self {
        Self::Candidates(paths)
    }
}

impl fmt::Display for RepositoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(path) => f.write_str(path),
            Self::Candidates(paths) => f.write_str(&paths.join(", ")),
        }
    }
}

/// A detected repository. `base_path` always starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryInfo {
    path: RepositoryPath,
    base_path: String,
    supports_changesets: bool,
    supports_parent_diffs: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    uuid: Option<String>,
}

impl RepositoryInfo {
    #[must_use]
    pub fn new(path: impl Into<RepositoryPath>, base_path: &str) -> Self {
        let info = Self {
            path: path.into(),
            base_path: normalize_base_path(base_path),
            supports_changesets: false,
            supports_parent_diffs: false,
            uuid: None,
        };
        debug!("Repository info '{info}'");
        info
    }

    #[must_use]
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }

    pub fn set_base_path(&mut self, base_path: &str) {
        let base_path = normalize_base_path(base_path);
        debug!("Changing repository base path from {} to {base_path}", self.base_path);
        self.base_path = base_path;
    }

    #[must_use]
    pub fn path(&self) -> &RepositoryPath {
        &self.path
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    #[must_use]
    pub fn supports_changesets(&self) -> bool {
        self.supports_changesets
    }

    #[must_use]
    pub fn supports_parent_diffs(&self) -> bool {
        self.supports_parent_diffs
    }

    #[must_use]
    pub fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }
}

impl fmt::Display for RepositoryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Path: {}, Base path: {}, Supports changesets: {}",
            self.path, self.base_path, self.supports_changesets
        )
    }
}

fn normalize_base_path(base_path: &str) -> String {
    if base_path.starts_with('/') {
        base_path.to_string()
    } else {
        format!("/{base_path}")
    }
}

/// One end of a diff range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Revision {
    /// A revision identifier or keyword the tool understands directly.
    Concrete(String),
    /// Uncommitted changes in the working copy.
    WorkingCopy,
    /// Uncommitted changes grouped under a named changelist.
    Changelist(String),
}

impl Revision {
    #[must_use]
    pub fn base() -> Self {
        Self::Concrete(BASE_KEYWORD.to_string())
    }

    #[must_use]
    pub fn concrete(id: impl Into<String>) -> Self {
        Self::Concrete(id.into())
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(id) => f.write_str(id),
            Self::WorkingCopy => f.write_str(WORKING_COPY_SENTINEL),
            Self::Changelist(name) => write!(f, "{CHANGELIST_SENTINEL_PREFIX}{name}"),
        }
    }
}

impl FromStr for Revision {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == WORKING_COPY_SENTINEL {
            return Ok(Self::WorkingCopy);
        }
        Ok(match s.strip_prefix(CHANGELIST_SENTINEL_PREFIX) {
            Some(name) => Self::Changelist(name.to_string()),
            None => Self::Concrete(s.to_string()),
        })
    }
}

impl Serialize for Revision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Revision {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let Ok(revision) = text.parse::<Revision>();
        Ok(revision)
    }
}

/// A resolved diff range. An absent `parent_base` means no parent diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionSpec {
    pub base: Revision,
    pub tip: Revision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_base: Option<Revision>,
}

impl RevisionSpec {
    #[must_use]
    pub fn new(base: Revision, tip: Revision) -> Self {
        Self {
            base,
            tip,
            parent_base: None,
        }
    }

    /// `BASE` against the uncommitted working copy.
    #[must_use]
    pub fn working_copy() -> Self {
        Self::new(Revision::base(), Revision::WorkingCopy)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    pub diff: Option<String>,
    pub parent_diff: Option<String>,
    pub base_commit_id: Option<String>,
}

impl DiffResult {
    #[must_use]
    pub fn new(diff: Option<String>) -> Self {
        Self {
            diff,
            ..Self::default()
        }
    }
}
