use std::sync::Mutex;

use zidian_lookup::{LookupClient, LookupError, LookupResponse, ProviderMetadata};

pub fn success_body() -> &'static str {
    r#"{"code":200,"msg":"success","result":{"list":[{
        "hanzi":"水","py":"shuǐ","bushou":"水","bihua":"4","wubi":"III",
        "bishun":"竖钩、横撇、撇、捺","content":"<p>无色无味的液体。</p>","explain":""
    }]}}"#
}

enum Reply {
    Body(&'static str),
    Status(u16),
}

/// Canned `LookupClient` that records every character it is asked for
pub struct FakeClient {
    reply: Reply,
    calls: Mutex<Vec<String>>,
}

impl FakeClient {
    pub fn responding(body: &'static str) -> Self {
        Self {
            reply: Reply::Body(body),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_with_status(status: u16) -> Self {
        Self {
            reply: Reply::Status(status),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LookupClient for FakeClient {
    async fn fetch(&self, character: &str) -> Result<LookupResponse, LookupError> {
        self.calls.lock().unwrap().push(character.to_string());

        match self.reply {
            Reply::Body(body) => Ok(serde_json::from_str(body)?),
            Reply::Status(status) => Err(LookupError::Status(status)),
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".to_string(),
            endpoint: "memory".to_string(),
            requires_api_key: false,
        }
    }
}
