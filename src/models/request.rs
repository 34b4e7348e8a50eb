use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DreamRequest {
    pub dream: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_text")]
    pub feedback: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DestinationImageRequest {
    pub destination: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageResponse {
    pub image: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

// Feedback is optional context: a non-string value is ignored rather than rejected.
fn deserialize_lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    match value {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}
