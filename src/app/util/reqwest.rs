use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Response, StatusCode};

use crate::app::models::api_error::ApiError;

pub fn get_content_type(res: &Response) -> Option<String> {
    res.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub async fn get_bytes(res: Response) -> Result<Bytes, ApiError> {
    match res.bytes().await {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            tracing::error!(%e);
            Err(ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Failed to get bytes from response.".to_string(),
            })
        }
    }
}

pub async fn get_text(res: Response) -> String {
    match res.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(%e);
            String::new()
        }
    }
}
