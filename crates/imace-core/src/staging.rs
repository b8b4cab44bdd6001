//! Files selected locally and held until an explicit upload.

use bytes::Bytes;
use std::fmt::{Debug, Display, Formatter};

use crate::ids::StagedFileId;

/// Local reference the presentation layer can use to preview a staged file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewRef(String);

impl PreviewRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PreviewRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A file held client-side pending upload.
#[derive(Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub id: StagedFileId,
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Bytes,
    pub preview: PreviewRef,
}

impl StagedFile {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: Option<String>,
        bytes: impl Into<Bytes>,
        preview: PreviewRef,
    ) -> Self {
        Self {
            id: StagedFileId::new(),
            file_name: file_name.into(),
            mime_type,
            bytes: bytes.into(),
            preview,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl Debug for StagedFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedFile")
            .field("id", &self.id)
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .field("preview", &self.preview)
            .finish()
    }
}
