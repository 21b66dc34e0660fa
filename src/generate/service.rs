use tracing::Instrument;
use uuid::Uuid;

use crate::{app::models::api_error::ApiError, AppState};

use super::{
    apis::{pollinations, replicate},
    dtos::generate_image_dto::GenerateImageDto,
    enums::image_provider::ImageProvider,
    errors::GenerateApiError,
    models::generated_image::GeneratedImage,
};

pub async fn generate_image(
    dto: &GenerateImageDto,
    state: &AppState,
) -> Result<GeneratedImage, ApiError> {
    if dto.prompt.is_none() {
        return Err(GenerateApiError::PromptRequired.value());
    }

    let provider = dto
        .provider
        .as_deref()
        .unwrap_or(ImageProvider::POLLINATIONS);

    let span = tracing::info_span!("generate", request_id = %Uuid::new_v4(), provider);

    let result = async {
        match provider {
            ImageProvider::POLLINATIONS => pollinations::service::generate_image(dto, state).await,
            ImageProvider::REPLICATE => replicate::service::generate_image(dto, state).await,
            _ => Err(GenerateApiError::UnsupportedProvider(provider.to_string()).value()),
        }
    }
    .instrument(span.clone())
    .await;

    if let Err(e) = &result {
        span.in_scope(|| tracing::error!("[GENERATION_ERROR] {} {}", e.code, e.message));
    }

    result
}
