// Primary catalog endpoints (JioSaavn-compatible API)
use super::{ProviderClient, ProviderRequest};
use crate::models::ProviderTag;
use crate::utils::errors::TransportError;
use crate::utils::http::{build_client, get_json, HttpSettings};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

pub struct PrimaryClient {
    client: Client,
    base_url: String,
}

impl PrimaryClient {
    pub fn new(base_url: &str, settings: &HttpSettings) -> Result<Self, TransportError> {
        Ok(Self {
            client: build_client(settings)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search/songs?query={}",
            self.base_url,
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl ProviderClient for PrimaryClient {
    fn tag(&self) -> ProviderTag {
        ProviderTag::Primary
    }

    async fn fetch(&self, request: &ProviderRequest) -> Result<Value, TransportError> {
        let url = match request {
            ProviderRequest::Search(query) | ProviderRequest::TrendingSeed(query) => {
                self.search_url(query)
            }
            // Single-track lookup goes to the secondary provider
            ProviderRequest::LookupById(_) => {
                return Err(TransportError::Unsupported("lookup by id"));
            }
        };

        log::debug!("[Primary] {} GET {}", request.kind(), url);
        get_json(&self.client, &url).await
    }
}
