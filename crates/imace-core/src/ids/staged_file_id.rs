use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Locally generated identifier of a staged file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StagedFileId(String);

impl StagedFileId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for StagedFileId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for StagedFileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for StagedFileId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StagedFileId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
