//! Client modules for external HTTP interactions

pub mod http_client;

pub use http_client::{HttpFetcher, PageFetcher};
