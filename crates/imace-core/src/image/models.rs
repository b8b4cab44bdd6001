use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Path of an indexed image as reported by the index service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImagePath(String);

impl ImagePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ImagePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ImagePath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ImagePath {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ImagePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One ranked hit of a text search.
///
/// `similarity` is a percentage in `[0, 100]`. Result order is defined by the
/// server and must be preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub path: ImagePath,
    pub similarity: f64,
}

impl SearchResultItem {
    pub fn new(path: impl Into<ImagePath>, similarity: f64) -> Self {
        Self {
            path: path.into(),
            similarity,
        }
    }

    /// Similarity clamped into the documented range.
    pub fn similarity_percent(&self) -> f64 {
        self.similarity.clamp(0.0, 100.0)
    }
}
