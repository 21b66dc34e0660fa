use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct ReplicatePredictionsResponse {
    pub id: String,
    pub status: String,
    pub output: Option<Value>,
    pub error: Option<Value>,
}

impl ReplicatePredictionsResponse {
    /// Output URLs. Models return either a list of URLs or a single URL.
    pub fn output_urls(&self) -> Vec<String> {
        match &self.output {
            Some(Value::String(url)) => vec![url.to_string()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str())
                .map(|url| url.to_string())
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match &self.error {
            None | Some(Value::Null) => None,
            Some(Value::String(message)) => Some(message.to_string()),
            Some(other) => Some(other.to_string()),
        }
    }
}
