use base64::Engine;

/// A `data:<mime>;base64,<payload>` URL split into its parts.
///
/// Only the base64 transport encoding is undone here; the payload stays an
/// opaque encoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum DataUrlError {
    #[error("missing `data:` scheme")]
    MissingScheme,
    #[error("missing `,` separator between header and payload")]
    MissingPayload,
    #[error("only base64 data URLs are supported")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    InvalidPayload(#[from] base64::DecodeError),
}

impl DataUrl {
    pub fn parse(input: &str) -> Result<Self, DataUrlError> {
        let rest = input
            .trim()
            .strip_prefix("data:")
            .ok_or(DataUrlError::MissingScheme)?;
        let (header, payload) = rest.split_once(',').ok_or(DataUrlError::MissingPayload)?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or(DataUrlError::NotBase64)?;

        let bytes = base64::engine::general_purpose::STANDARD.decode(payload)?;
        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes,
        })
    }
}
