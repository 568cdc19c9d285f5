use async_trait::async_trait;
use reqwest::{Client, Url};

use super::request::{ApiRequest, ApiResponse, Method};
use super::transport::Transport;
use crate::config::ApiConfig;
use crate::errors::CoreError;

/// `reqwest`-backed transport for the Stratos backend.
///
/// - **No retries**: a failed call is reported once.
/// - **No caching**: every call is a fresh round trip.
/// - **Timeout**: only when `ApiConfig::timeout` is set (never on wasm).
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, CoreError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| CoreError::Config(format!("Invalid API URL '{}': {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(CoreError::Config(format!(
                "API URL '{}' cannot be used as a base",
                config.base_url
            )));
        }

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match config.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Resolve a request's segments and query against the base URL.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, CoreError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| CoreError::Config(format!("API URL '{}' cannot be used as a base", self.base_url)))?;
            path.pop_if_empty();
            path.extend(request.segments.iter().map(String::as_str));
        }
        if !request.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, CoreError> {
        let url = self.url_for(&request)?;
        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let resp = builder.send().await?;
        let status = resp.status();
        let status_text = status.canonical_reason().unwrap_or("Unknown Status").to_string();
        let body = resp.bytes().await?.to_vec();

        Ok(ApiResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}
