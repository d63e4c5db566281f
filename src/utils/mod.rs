pub mod error_handling;
pub mod errors;
pub mod hashing;
pub mod http;
pub mod json;

// Re-export commonly used types
pub use errors::{ConfigError, MalformedItemError, StoreError, TransportError};
