// Remote catalog provider clients

pub mod primary;
pub mod secondary;

use crate::models::ProviderTag;
use crate::utils::errors::TransportError;
use async_trait::async_trait;
use serde_json::Value;

// Re-export commonly used types
pub use primary::PrimaryClient;
pub use secondary::SecondaryClient;

/// What to ask a provider for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderRequest {
    Search(String),
    /// Fixed topical query standing in for a trending endpoint
    TrendingSeed(String),
    LookupById(i64),
}

impl ProviderRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderRequest::Search(_) => "search",
            ProviderRequest::TrendingSeed(_) => "trending",
            ProviderRequest::LookupById(_) => "lookup",
        }
    }
}

/// One outbound request to one provider.
///
/// Exactly one network round trip per call: no retries and no fallback here.
/// Returns the raw body, or a `TransportError` for timeouts, non-2xx and non-JSON.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    fn tag(&self) -> ProviderTag;

    async fn fetch(&self, request: &ProviderRequest) -> Result<Value, TransportError>;
}
