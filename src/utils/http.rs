// Shared HTTP helpers for provider clients
use crate::utils::errors::TransportError;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Per-provider transport settings
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Sent as `User-Agent` when the provider rejects non-browser clients
    pub user_agent: Option<String>,
}

/// Build a client with bounded connect and total request timeouts.
pub fn build_client(settings: &HttpSettings) -> Result<Client, TransportError> {
    let mut builder = Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout);

    if let Some(agent) = &settings.user_agent {
        builder = builder.user_agent(agent.clone());
    }

    builder.build().map_err(TransportError::Request)
}

/// Single GET returning the body as untyped JSON.
///
/// Non-2xx status, timeouts and non-JSON bodies all come back as `TransportError`.
/// No retries: fallback policy belongs to the caller.
pub async fn get_json(client: &Client, url: &str) -> Result<Value, TransportError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))
}


#[cfg(test)]
mod tests {
    use super::test_server::{Reply, StubServer};
    use super::*;

    fn settings() -> HttpSettings {
        HttpSettings {
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_millis(500),
            user_agent: Some("stub-agent/1.0".to_string()),
        }
    }

    #[tokio::test]
    async fn returns_json_on_success() {
        let server = StubServer::start(vec![Reply::Json(200, r#"{"ok":true}"#.into())]);
        let client = build_client(&settings()).unwrap();

        let value = get_json(&client, &format!("{}/x", server.base_url)).await.unwrap();
        assert_eq!(value["ok"], true);

        let seen = server.finish();
        assert_eq!(seen[0].1.as_deref(), Some("stub-agent/1.0"));
    }

    #[tokio::test]
    async fn non_success_status_is_transport_error() {
        let server = StubServer::start(vec![Reply::Json(503, "{}".into())]);
        let client = build_client(&settings()).unwrap();

        let err = get_json(&client, &format!("{}/x", server.base_url)).await.unwrap_err();
        assert!(matches!(err, TransportError::Status(503)));
        server.finish();
    }

    #[tokio::test]
    async fn non_json_body_is_decode_error() {
        let server = StubServer::start(vec![Reply::Text(200, "<html>maintenance</html>".into())]);
        let client = build_client(&settings()).unwrap();

        let err = get_json(&client, &format!("{}/x", server.base_url)).await.unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
        server.finish();
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let server = StubServer::start(vec![Reply::Stall(Duration::from_millis(1500))]);
        let client = build_client(&settings()).unwrap();

        let err = get_json(&client, &format!("{}/x", server.base_url)).await.unwrap_err();
        assert!(matches!(err, TransportError::Timeout));
        server.finish();
    }
}
