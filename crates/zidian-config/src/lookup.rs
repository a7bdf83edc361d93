use std::env;

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://apis.tianapi.com/xhzd/index".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

/// Dictionary endpoint and credential. Fixed at deploy time, never user input.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct LookupConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    /// 0 disables the request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl LookupConfig {
    pub fn apply_env(&mut self) {
        if let Ok(url) = env::var("ZIDIAN_BASE_URL") {
            self.base_url = url;
        }

        if let Ok(key) = env::var("ZIDIAN_API_KEY") {
            self.api_key = key;
        }

        if let Some(secs) = env::var("ZIDIAN_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_seconds = secs;
        }
    }
}
