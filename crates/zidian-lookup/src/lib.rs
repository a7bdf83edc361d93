mod payload;
mod tianapi;

pub use payload::{LookupRecord, LookupResponse, ResultList, SUCCESS_CODE};
pub use tianapi::TianApiClient;

/// Remote dictionary interface
#[async_trait::async_trait]
pub trait LookupClient: Send + Sync {
    /// Fetch the raw dictionary payload for a single character
    async fn fetch(&self, character: &str) -> Result<LookupResponse, LookupError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub endpoint: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API error {code}: {}", .message.as_deref().unwrap_or("no message"))]
    Api { code: i64, message: Option<String> },

    #[error("No entry in result list")]
    EmptyResult,
}

impl LookupError {
    /// Failed before a payload could be decoded
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status(_) | Self::Decode(_))
    }
}
