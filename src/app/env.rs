use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub port: Option<u16>,

    pub pollinations_api_url: Option<String>,
    pub pollinations_max_retries: Option<usize>,
    pub pollinations_retry_delay_ms: Option<u64>,

    pub replicate_api_url: Option<String>,
    pub replicate_api_token: Option<String>,
    pub replicate_poll_interval_ms: Option<u64>,
    pub replicate_max_wait_ms: Option<u64>,
}

fn default_app_env() -> String {
    "development".to_string()
}

impl Envy {
    pub fn pollinations_api_url(&self) -> &str {
        self.pollinations_api_url
            .as_deref()
            .unwrap_or("https://image.pollinations.ai")
    }

    pub fn pollinations_max_retries(&self) -> usize {
        self.pollinations_max_retries.unwrap_or(3)
    }

    pub fn pollinations_retry_delay_ms(&self) -> u64 {
        self.pollinations_retry_delay_ms.unwrap_or(1500)
    }

    pub fn replicate_api_url(&self) -> &str {
        self.replicate_api_url
            .as_deref()
            .unwrap_or("https://api.replicate.com/v1")
    }

    pub fn replicate_api_token(&self) -> Option<&str> {
        self.replicate_api_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }

    pub fn replicate_poll_interval_ms(&self) -> u64 {
        self.replicate_poll_interval_ms.unwrap_or(1000)
    }

    pub fn replicate_max_wait_ms(&self) -> u64 {
        self.replicate_max_wait_ms.unwrap_or(600_000)
    }
}
