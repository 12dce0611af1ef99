// Adapters layer: concrete implementations for external systems.

pub mod http;
pub mod output;
pub mod storage;

pub use http::{CachedClient, ResponseCache};
pub use output::ReportEmitter;
pub use storage::LocalStorage;
