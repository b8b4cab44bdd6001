use std::path::PathBuf;
use thiserror::Error;

/// Failures of the remote image index.
///
/// A superseded response is not an error; it never reaches this type.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The request never completed.
    #[error("request to {endpoint} failed: {message}")]
    Network {
        endpoint: &'static str,
        message: String,
    },

    /// Non-2xx status.
    #[error("{endpoint} returned HTTP {status}")]
    Server { endpoint: &'static str, status: u16 },

    /// 2xx with a body that does not match the contract.
    #[error("unexpected response from {endpoint}: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },

    #[error("invalid index base url `{url}`: {message}")]
    InvalidBaseUrl { url: String, message: String },

    /// The request could not be built locally.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl IndexError {
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            IndexError::Network { endpoint, .. }
            | IndexError::Server { endpoint, .. }
            | IndexError::Decode { endpoint, .. } => Some(endpoint),
            IndexError::InvalidBaseUrl { .. } | IndexError::InvalidRequest(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is not a regular file")]
    NotAFile(PathBuf),
}
