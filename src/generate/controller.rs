use axum::{extract::State, http::StatusCode};
use validator::Validate;

use crate::{
    app::models::{api_error::ApiError, json_from_request::JsonFromRequest},
    AppState,
};

use super::{dtos::generate_image_dto::GenerateImageDto, models::generated_image::GeneratedImage, service};

pub async fn generate_image(
    State(state): State<AppState>,
    JsonFromRequest(dto): JsonFromRequest<GenerateImageDto>,
) -> Result<GeneratedImage, ApiError> {
    let dto = dto.sanitized();

    match dto.validate() {
        Ok(_) => service::generate_image(&dto, &state).await,
        Err(e) => Err(ApiError {
            code: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        }),
    }
}
