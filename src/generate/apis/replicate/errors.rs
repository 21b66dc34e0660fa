use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug, PartialEq)]
pub enum ReplicateApiError {
    MissingToken,
    Authentication,
    Billing,
    PredictionFailed,
    NoOutput,
    OutputUnavailable,
}

impl ReplicateApiError {
    pub fn value(&self) -> ApiError {
        let message = match *self {
            Self::MissingToken => "REPLICATE_API_TOKEN is not configured.",
            Self::Authentication => "Authentication with the image generation provider failed. Please check the API token.",
            Self::Billing => "The image generation provider reported a billing issue. Please check the account's billing settings.",
            Self::PredictionFailed => "The model failed to generate an image. Please try a different prompt or settings.",
            Self::NoOutput => "The model returned no images.",
            Self::OutputUnavailable => "Failed to download the generated image.",
        };

        ApiError {
            code: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }
}

/// A failed prediction run, carrying whatever structure the API gave us.
#[derive(Debug)]
pub struct ReplicateFailure {
    pub status: Option<StatusCode>,
    pub prediction_failed: bool,
    pub message: String,
}

impl ReplicateFailure {
    pub fn kind(&self) -> Option<ReplicateApiError> {
        match self.status {
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN) => {
                return Some(ReplicateApiError::Authentication)
            }
            Some(StatusCode::PAYMENT_REQUIRED) => return Some(ReplicateApiError::Billing),
            _ => {}
        }

        if self.prediction_failed {
            return Some(ReplicateApiError::PredictionFailed);
        }

        // older client errors only carry text
        let message = self.message.to_lowercase();
        if message.contains("authentication") {
            Some(ReplicateApiError::Authentication)
        } else if message.contains("billing") {
            Some(ReplicateApiError::Billing)
        } else if message.contains("prediction failed") {
            Some(ReplicateApiError::PredictionFailed)
        } else {
            None
        }
    }

    pub fn to_api_error(&self) -> ApiError {
        match self.kind() {
            Some(kind) => kind.value(),
            None => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: self.message.to_string(),
            },
        }
    }
}
