use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum GenerateApiError {
    PromptRequired,
    StyleRequired,
    AspectRatioRequired,
    ModelRequired,
    UnsupportedModel(String),
    UnsupportedProvider(String),
    ServiceUnavailable,
    InvalidResponse,
}

impl GenerateApiError {
    pub fn value(&self) -> ApiError {
        match self {
            Self::PromptRequired => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Prompt is required".to_string(),
            },
            Self::StyleRequired => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Style is required".to_string(),
            },
            Self::AspectRatioRequired => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Aspect ratio is required".to_string(),
            },
            Self::ModelRequired => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Model is required".to_string(),
            },
            Self::UnsupportedModel(model) => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: format!("Unsupported model: {}", model),
            },
            Self::UnsupportedProvider(provider) => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: format!("Unsupported provider: {}", provider),
            },
            Self::ServiceUnavailable => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "The image generation service failed after multiple attempts. It may be temporarily down. Please try again later.".to_string(),
            },
            Self::InvalidResponse => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "The image generation service returned an invalid response. Please try a different prompt or check the service status.".to_string(),
            },
        }
    }
}
