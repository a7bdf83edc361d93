use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::LookupError;

/// Status code the API uses for a successful lookup
pub const SUCCESS_CODE: i64 = 200;

/// Decoded API response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct LookupResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub result: Option<ResultList>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultList {
    #[serde(default)]
    pub list: Vec<LookupRecord>,
}

/// One dictionary entry. The API omits, nulls or empties fields freely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub hanzi: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub py: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub pyyb: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub bushou: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub bihua: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub wubi: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub bishun: String,
    /// Short definition, may contain markup
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
    /// Extended explanation, may contain markup
    #[serde(default, deserialize_with = "lenient_text")]
    pub explain: String,
}

impl LookupRecord {
    /// Toned pinyin (`pyyb`) when present, plain `py` otherwise
    pub fn reading(&self) -> &str {
        if self.pyyb.is_empty() {
            &self.py
        } else {
            &self.pyyb
        }
    }
}

impl LookupResponse {
    /// Check the logical status and take the first entry
    pub fn into_record(self) -> Result<LookupRecord, LookupError> {
        if self.code != SUCCESS_CODE {
            let message = self.msg.filter(|m| !m.trim().is_empty());
            return Err(LookupError::Api {
                code: self.code,
                message,
            });
        }

        self.result
            .and_then(|result| result.list.into_iter().next())
            .ok_or(LookupError::EmptyResult)
    }
}

/// Strings pass through, numbers are stringified, null becomes empty
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}
