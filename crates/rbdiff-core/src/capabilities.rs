use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Capability path gating synthesized empty-file headers for Subversion.
pub const EMPTY_FILES_CAPABILITY: [&str; 3] = ["scmtools", "svn", "empty_files"];

/// The capability tree a review server advertises.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capabilities(Value);

impl Capabilities {
    #[must_use]
    pub fn new(tree: Value) -> Self {
        Self(tree)
    }

    /// # Errors
    ///
    /// Returns an error if `json` is not valid JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json).map(Self)
    }

    /// True only if every key along `path` exists and the leaf is `true`.
    #[must_use]
    pub fn has_capability(&self, path: &[&str]) -> bool {
        let mut node = &self.0;
        for key in path {
            match node.get(key) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node == &Value::Bool(true)
    }
}

impl From<Value> for Capabilities {
    fn from(tree: Value) -> Self {
        Self(tree)
    }
}
