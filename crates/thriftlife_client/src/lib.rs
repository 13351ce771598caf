//! ThriftLife browsing client: an HTTP adapter for the backend, a read-only
//! application context, and one view model per page.

pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ClientConfig;
pub use context::AppContext;
pub use error::ClientError;
pub use http::HttpBackend;
pub use views::{Notice, NoticeLevel, View};
