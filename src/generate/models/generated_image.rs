use axum::{
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use crate::app::{
    models::api_error::ApiError,
    util::reqwest::{get_bytes, get_content_type},
};

use crate::generate::errors::GenerateApiError;

#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Bytes,
    pub content_type: String,
}

impl GeneratedImage {
    /// Reads an upstream image response. A missing content type falls back to
    /// `default_content_type` when one is given; anything that is not
    /// `image/*` is rejected.
    pub async fn from_response(
        res: reqwest::Response,
        default_content_type: Option<&str>,
    ) -> Result<Self, ApiError> {
        let content_type = get_content_type(&res).or(default_content_type.map(str::to_string));

        let Some(content_type) = content_type.filter(|c| is_image(c)) else {
            tracing::error!(
                "upstream did not return an image (content type {:?}), the prompt may have been rejected",
                get_content_type(&res)
            );
            return Err(GenerateApiError::InvalidResponse.value());
        };

        let bytes = get_bytes(res).await?;

        Ok(Self {
            bytes,
            content_type,
        })
    }
}

fn is_image(content_type: &str) -> bool {
    content_type
        .parse::<mime::Mime>()
        .map(|m| m.type_() == mime::IMAGE)
        .unwrap_or(false)
}

impl IntoResponse for GeneratedImage {
    fn into_response(self) -> Response {
        ([(CONTENT_TYPE, self.content_type)], self.bytes).into_response()
    }
}
