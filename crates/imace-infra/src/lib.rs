//! Infrastructure adapters for the Imace client.
//!
//! - [`http`]: the remote image index over HTTP
//! - [`staging`]: local file loading for the upload staging area

pub mod http;
pub mod staging;

pub use http::HttpImageIndexClient;
pub use staging::FsFileStager;
