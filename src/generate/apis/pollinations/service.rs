use std::time::Duration;

use rand::Rng;
use reqwest::{header::ACCEPT, Response, StatusCode, Url};
use tokio_retry::{strategy::FixedInterval, Retry};

use crate::{
    app::{models::api_error::ApiError, util::reqwest::get_text},
    generate::{
        dtos::generate_image_dto::GenerateImageDto, errors::GenerateApiError,
        models::generated_image::GeneratedImage, util::seed::resolve_seed,
    },
    AppState,
};

use super::{
    config::{DEFAULT_CFG_SCALE, DEFAULT_STEPS},
    enums::{
        pollinations_aspect_ratio::dimensions,
        pollinations_style::{style_suffix, NEGATIVE_PROMPT_PREFIX},
    },
    models::input_spec::InputSpec,
};

#[derive(Debug)]
enum FetchError {
    Status { status: StatusCode, body: String },
    Transport(String),
}

pub async fn generate_image(
    dto: &GenerateImageDto,
    state: &AppState,
) -> Result<GeneratedImage, ApiError> {
    let input_spec = provide_input_spec(dto, &mut rand::thread_rng())?;
    let url = input_spec.url(state.envy.pollinations_api_url())?;

    tracing::debug!("fetching from: {}", url);

    let retry_delay = Duration::from_millis(state.envy.pollinations_retry_delay_ms());
    let response =
        match fetch_with_retry(&url, &state.client, state.envy.pollinations_max_retries(), retry_delay)
            .await
        {
            Ok(response) => response,
            Err(FetchError::Status { status, body }) => {
                tracing::error!("pollinations api error ({}): {}", status, body);
                return Err(GenerateApiError::ServiceUnavailable.value());
            }
            Err(FetchError::Transport(message)) => {
                tracing::error!("pollinations api request failed: {}", message);
                return Err(ApiError {
                    code: StatusCode::INTERNAL_SERVER_ERROR,
                    message,
                });
            }
        };

    GeneratedImage::from_response(response, None).await
}

pub fn provide_input_spec<R: Rng + ?Sized>(
    dto: &GenerateImageDto,
    rng: &mut R,
) -> Result<InputSpec, ApiError> {
    let Some(prompt) = &dto.prompt else {
        return Err(GenerateApiError::PromptRequired.value());
    };
    let Some(style) = &dto.style else {
        return Err(GenerateApiError::StyleRequired.value());
    };
    let Some(aspect_ratio) = &dto.aspect_ratio else {
        return Err(GenerateApiError::AspectRatioRequired.value());
    };

    let mut full_prompt = format!("{}{}", prompt, style_suffix(style));
    if let Some(negative_prompt) = &dto.negative_prompt {
        full_prompt.push_str(NEGATIVE_PROMPT_PREFIX);
        full_prompt.push_str(negative_prompt);
    }

    let (width, height) = dimensions(aspect_ratio);

    Ok(InputSpec {
        prompt: full_prompt,
        width,
        height,
        seed: resolve_seed(dto.seed, rng),
        cfg: dto.cfg_scale.unwrap_or(DEFAULT_CFG_SCALE),
        steps: dto.steps.unwrap_or(DEFAULT_STEPS),
        nologo: true,
    })
}

/// One initial attempt plus up to `retries` more, `delay` apart.
async fn fetch_with_retry(
    url: &Url,
    client: &reqwest::Client,
    retries: usize,
    delay: Duration,
) -> Result<Response, FetchError> {
    let retry_strategy = FixedInterval::new(delay).take(retries);
    let mut retries_left = retries;

    Retry::spawn(retry_strategy, || {
        let left = retries_left;
        retries_left = retries_left.saturating_sub(1);
        fetch(url, client, left)
    })
    .await
}

async fn fetch(
    url: &Url,
    client: &reqwest::Client,
    retries_left: usize,
) -> Result<Response, FetchError> {
    match client.get(url.clone()).header(ACCEPT, "image/png").send().await {
        Ok(res) if res.status().is_success() => Ok(res),
        Ok(res) => {
            let status = res.status();
            if retries_left > 0 {
                tracing::warn!(
                    "api request failed with status {}. retrying... ({} left)",
                    status,
                    retries_left - 1
                );
            }
            Err(FetchError::Status {
                status,
                body: get_text(res).await,
            })
        }
        Err(e) => {
            if retries_left > 0 {
                tracing::warn!(
                    "api request threw an error. retrying... ({} left): {}",
                    retries_left - 1,
                    e
                );
            }
            Err(FetchError::Transport(e.without_url().to_string()))
        }
    }
}
