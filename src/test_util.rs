use std::sync::Arc;

use crate::{app::env::Envy, AppState};

/// State pointing both providers at `api_url` with fast retry and polling.
pub fn test_state(api_url: &str) -> AppState {
    state(api_url, Some("test-token".to_string()))
}

pub fn test_state_without_token(api_url: &str) -> AppState {
    state(api_url, None)
}

fn state(api_url: &str, replicate_api_token: Option<String>) -> AppState {
    let envy = Envy {
        app_env: "test".to_string(),
        port: None,
        pollinations_api_url: Some(api_url.to_string()),
        pollinations_max_retries: Some(3),
        pollinations_retry_delay_ms: Some(20),
        replicate_api_url: Some(api_url.to_string()),
        replicate_api_token,
        replicate_poll_interval_ms: Some(10),
        replicate_max_wait_ms: Some(5_000),
    };

    AppState {
        envy: Arc::new(envy),
        client: reqwest::Client::new(),
    }
}
