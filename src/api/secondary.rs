// Secondary catalog endpoints (iTunes Search API, preview clips only)
use super::{ProviderClient, ProviderRequest};
use crate::models::ProviderTag;
use crate::utils::errors::TransportError;
use crate::utils::http::{build_client, get_json, HttpSettings};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

pub struct SecondaryClient {
    client: Client,
    base_url: String,
    search_limit: u32,
}

impl SecondaryClient {
    pub fn new(
        base_url: &str,
        search_limit: u32,
        settings: &HttpSettings,
    ) -> Result<Self, TransportError> {
        Ok(Self {
            client: build_client(settings)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            search_limit,
        })
    }

    fn url_for(&self, request: &ProviderRequest) -> String {
        match request {
            ProviderRequest::Search(term) | ProviderRequest::TrendingSeed(term) => format!(
                "{}/search?term={}&entity=song&limit={}",
                self.base_url,
                urlencoding::encode(term),
                self.search_limit
            ),
            ProviderRequest::LookupById(id) => format!("{}/lookup?id={}", self.base_url, id),
        }
    }
}

#[async_trait]
impl ProviderClient for SecondaryClient {
    fn tag(&self) -> ProviderTag {
        ProviderTag::Secondary
    }

    async fn fetch(&self, request: &ProviderRequest) -> Result<Value, TransportError> {
        let url = self.url_for(request);
        log::debug!("[Secondary] {} GET {}", request.kind(), url);
        get_json(&self.client, &url).await
    }
}
