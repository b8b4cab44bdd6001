mod dto;
pub mod index_client;

pub use index_client::HttpImageIndexClient;
