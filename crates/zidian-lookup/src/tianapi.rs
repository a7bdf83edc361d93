use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::{LookupClient, LookupError, LookupResponse, ProviderMetadata};

/// Characters left unescaped by JavaScript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// TianAPI `xhzd` (Xinhua dictionary) client
#[derive(Clone)]
pub struct TianApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TianApiClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Build with a request timeout, `None` waits indefinitely
    pub fn with_timeout(
        base_url: String,
        api_key: String,
        timeout: Option<Duration>,
    ) -> Result<Self, LookupError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::with_client(builder.build()?, base_url, api_key))
    }

    pub fn with_client(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Full request URL for `character`
    pub fn request_url(&self, character: &str) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };

        format!(
            "{}{}key={}&word={}",
            self.base_url,
            separator,
            utf8_percent_encode(&self.api_key, URI_COMPONENT),
            utf8_percent_encode(character, URI_COMPONENT),
        )
    }
}

#[async_trait]
impl LookupClient for TianApiClient {
    async fn fetch(&self, character: &str) -> Result<LookupResponse, LookupError> {
        tracing::debug!(character, endpoint = %self.base_url, "Sending lookup request");

        let response = self.client.get(self.request_url(character)).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Lookup endpoint answered HTTP {}", status);
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let payload: LookupResponse = serde_json::from_str(&body)?;

        tracing::debug!(code = payload.code, "Lookup response decoded");
        Ok(payload)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "TianAPI xhzd".to_string(),
            endpoint: self.base_url.clone(),
            requires_api_key: true,
        }
    }
}
