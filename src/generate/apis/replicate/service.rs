use std::time::Duration;

use rand::Rng;
use reqwest::header;
use tokio::time::{sleep, Instant};

use crate::{
    app::{errors::DefaultApiError, models::api_error::ApiError, util::reqwest::get_text},
    generate::{
        dtos::generate_image_dto::GenerateImageDto, errors::GenerateApiError,
        models::generated_image::GeneratedImage, util::seed::resolve_seed,
    },
    AppState,
};

use super::{
    config::{DEFAULT_CFG_SCALE, DEFAULT_IMAGE_STRENGTH},
    enums::{
        replicate_aspect_ratio::dimensions, replicate_model::ReplicateModel,
        replicate_prediction_status::ReplicatePredictionStatus,
    },
    errors::{ReplicateApiError, ReplicateFailure},
    models::{input_spec::InputSpec, input_spec_image::InputSpecImage},
    structs::replicate_predictions_response::ReplicatePredictionsResponse,
};

pub async fn generate_image(
    dto: &GenerateImageDto,
    state: &AppState,
) -> Result<GeneratedImage, ApiError> {
    let input_spec = provide_input_spec(dto, &mut rand::thread_rng())?;

    let Some(replicate_api_token) = state.envy.replicate_api_token() else {
        tracing::error!("REPLICATE_API_TOKEN is not set");
        return Err(ReplicateApiError::MissingToken.value());
    };

    let prediction = match run_prediction(&input_spec, replicate_api_token, state).await {
        Ok(prediction) => prediction,
        Err(failure) => {
            tracing::error!("replicate prediction failed: {:?}", failure);
            return Err(failure.to_api_error());
        }
    };

    let Some(url) = prediction.output_urls().into_iter().next() else {
        tracing::error!("replicate returned no output: {:?}", prediction);
        return Err(ReplicateApiError::NoOutput.value());
    };

    get_image(&url, state).await
}

pub fn provide_input_spec<R: Rng + ?Sized>(
    dto: &GenerateImageDto,
    rng: &mut R,
) -> Result<InputSpec, ApiError> {
    let Some(prompt) = &dto.prompt else {
        return Err(GenerateApiError::PromptRequired.value());
    };
    let Some(tag) = &dto.model else {
        return Err(GenerateApiError::ModelRequired.value());
    };
    let Some(model) = ReplicateModel::from_tag(tag) else {
        return Err(GenerateApiError::UnsupportedModel(tag.to_string()).value());
    };

    let (width, height) = dimensions(dto.aspect_ratio.as_deref());
    let image = dto.uploaded_image_url.clone();
    let image_guidance_scale = match image {
        Some(_) => Some(dto.image_strength.unwrap_or(DEFAULT_IMAGE_STRENGTH)),
        None => None,
    };

    let input = InputSpecImage {
        prompt: prompt.to_string(),
        negative_prompt: dto.negative_prompt.clone(),
        seed: resolve_seed(dto.seed, rng),
        guidance_scale: dto.cfg_scale.unwrap_or(DEFAULT_CFG_SCALE),
        num_inference_steps: dto.steps.unwrap_or(model.default_steps),
        width,
        height,
        image,
        image_guidance_scale,
    };

    let input = match serde_json::to_value(input) {
        Ok(input) => input,
        Err(e) => {
            tracing::error!("failed to serialize replicate input: {}", e);
            return Err(DefaultApiError::InternalServerError.value());
        }
    };

    Ok(InputSpec {
        version: model.version().to_string(),
        input,
    })
}

/// Creates a prediction and waits for it to settle. Not retried.
async fn run_prediction(
    input_spec: &InputSpec,
    replicate_api_token: &str,
    state: &AppState,
) -> Result<ReplicatePredictionsResponse, ReplicateFailure> {
    let mut prediction = create_prediction(input_spec, replicate_api_token, state).await?;

    let started = Instant::now();
    let poll_interval = Duration::from_millis(state.envy.replicate_poll_interval_ms());
    let max_wait = Duration::from_millis(state.envy.replicate_max_wait_ms());

    while !ReplicatePredictionStatus::is_terminal(&prediction.status) {
        if started.elapsed() >= max_wait {
            return Err(ReplicateFailure {
                status: None,
                prediction_failed: false,
                message: format!("Prediction {} timed out", prediction.id),
            });
        }

        tracing::debug!(
            "waiting for prediction {} ({})",
            prediction.id,
            prediction.status
        );
        sleep(poll_interval).await;

        prediction = get_prediction_by_id(&prediction.id, replicate_api_token, state).await?;
    }

    if prediction.status == ReplicatePredictionStatus::Failed.value() {
        return Err(ReplicateFailure {
            status: None,
            prediction_failed: true,
            message: format!(
                "Prediction failed: {}",
                prediction.error_message().unwrap_or_default()
            ),
        });
    }

    if prediction.status == ReplicatePredictionStatus::Canceled.value() {
        return Err(ReplicateFailure {
            status: None,
            prediction_failed: false,
            message: "Prediction was canceled".to_string(),
        });
    }

    Ok(prediction)
}

async fn create_prediction(
    input_spec: &InputSpec,
    replicate_api_token: &str,
    state: &AppState,
) -> Result<ReplicatePredictionsResponse, ReplicateFailure> {
    let url = format!("{}/predictions", state.envy.replicate_api_url());
    tracing::debug!("creating prediction for version {}", input_spec.version);

    let request = state
        .client
        .post(&url)
        .header(header::AUTHORIZATION, format!("Token {}", replicate_api_token))
        .header("Prefer", "wait")
        .json(input_spec);

    send(request, &url).await
}

async fn get_prediction_by_id(
    id: &str,
    replicate_api_token: &str,
    state: &AppState,
) -> Result<ReplicatePredictionsResponse, ReplicateFailure> {
    let url = format!("{}/predictions/{}", state.envy.replicate_api_url(), id);

    let request = state
        .client
        .get(&url)
        .header(header::AUTHORIZATION, format!("Token {}", replicate_api_token));

    send(request, &url).await
}

async fn send(
    request: reqwest::RequestBuilder,
    url: &str,
) -> Result<ReplicatePredictionsResponse, ReplicateFailure> {
    let res = match request.send().await {
        Ok(res) => res,
        Err(e) => {
            return Err(ReplicateFailure {
                status: None,
                prediction_failed: false,
                message: e.to_string(),
            })
        }
    };

    let status = res.status();
    let text = get_text(res).await;

    if !status.is_success() {
        return Err(ReplicateFailure {
            status: Some(status),
            prediction_failed: false,
            message: format!("Request to {} failed with status {}: {}", url, status, text),
        });
    }

    match serde_json::from_str(&text) {
        Ok(prediction) => Ok(prediction),
        Err(e) => {
            tracing::warn!("unexpected prediction payload: {:?}", text);
            Err(ReplicateFailure {
                status: Some(status),
                prediction_failed: false,
                message: format!("Invalid prediction response: {}", e),
            })
        }
    }
}

async fn get_image(url: &str, state: &AppState) -> Result<GeneratedImage, ApiError> {
    tracing::debug!("fetching output: {}", url);

    let res = match state.client.get(url).send().await {
        Ok(res) if res.status().is_success() => res,
        Ok(res) => {
            tracing::error!("replicate output returned {}", res.status());
            return Err(ReplicateApiError::OutputUnavailable.value());
        }
        Err(e) => {
            tracing::error!(%e);
            return Err(ReplicateApiError::OutputUnavailable.value());
        }
    };

    GeneratedImage::from_response(res, Some(mime::IMAGE_PNG.as_ref())).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use rand::{rngs::StdRng, SeedableRng};
    use serde_json::json;
    use wiremock::{
        matchers::{body_partial_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use crate::test_util::{test_state, test_state_without_token};

    use super::*;

    fn dto() -> GenerateImageDto {
        GenerateImageDto {
            prompt: Some("a koi pond".to_string()),
            model: Some("stable-diffusion-xl".to_string()),
            aspect_ratio: Some("16:9".to_string()),
            seed: Some(77),
            provider: Some("replicate".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn input_spec_uses_model_table() {
        let spec = provide_input_spec(&dto(), &mut StdRng::seed_from_u64(0)).unwrap();

        assert_eq!(spec.version, ReplicateModel::STABLE_DIFFUSION_XL.version());
        assert_eq!(
            spec.input,
            json!({
                "prompt": "a koi pond",
                "seed": 77,
                "guidance_scale": 7.5,
                "num_inference_steps": 25,
                "width": 1344,
                "height": 768,
            })
        );
    }

    #[test]
    fn input_spec_passes_negative_prompt_and_source_image() {
        let mut dto = dto();
        dto.model = Some("photorealistic".to_string());
        dto.negative_prompt = Some("blurry".to_string());
        dto.uploaded_image_url = Some("https://example.com/src.png".to_string());

        let spec = provide_input_spec(&dto, &mut StdRng::seed_from_u64(0)).unwrap();

        assert_eq!(spec.input["negative_prompt"], "blurry");
        assert_eq!(spec.input["num_inference_steps"], 30);
        assert_eq!(spec.input["image"], "https://example.com/src.png");
        let strength = spec.input["image_guidance_scale"].as_f64().unwrap();
        assert!((strength - 0.8).abs() < 1e-6);
    }

    #[test]
    fn input_spec_keeps_negative_seed() {
        let mut dto = dto();
        dto.seed = Some(-5);

        let spec = provide_input_spec(&dto, &mut StdRng::seed_from_u64(0)).unwrap();

        assert_eq!(spec.input["seed"], -5);
    }

    #[test]
    fn unknown_model_is_client_error() {
        let mut dto = dto();
        dto.model = Some("midjourney".to_string());

        let e = provide_input_spec(&dto, &mut StdRng::seed_from_u64(0)).unwrap_err();

        assert_eq!(e.code, StatusCode::BAD_REQUEST);
        assert_eq!(e.message, "Unsupported model: midjourney");
    }

    #[tokio::test]
    async fn relays_first_output_image() {
        let server = MockServer::start().await;
        let output_url = format!("{}/files/out-0.webp", server.uri());

        Mock::given(method("POST"))
            .and(path("/predictions"))
            .and(header("authorization", "Token test-token"))
            .and(body_partial_json(json!({
                "version": ReplicateModel::STABLE_DIFFUSION_XL.version(),
                "input": { "prompt": "a koi pond", "seed": 77 }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "p1",
                "status": "starting",
                "output": null
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/predictions/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "p1",
                "status": "succeeded",
                "output": [output_url, format!("{}/files/out-1.webp", server.uri())]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/files/out-0.webp"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/webp")
                    .set_body_bytes(b"RIFF".to_vec()),
            )
            .expect(1)
            .mount(&server)
            .await;

        let state = test_state(&server.uri());
        let image = generate_image(&dto(), &state).await.unwrap();

        assert_eq!(image.content_type, "image/webp");
        assert_eq!(image.bytes.as_ref(), b"RIFF");
    }

    #[tokio::test]
    async fn missing_token_makes_no_request() {
        let server = MockServer::start().await;

        let state = test_state_without_token(&server.uri());
        let e = generate_image(&dto(), &state).await.unwrap_err();

        assert_eq!(e, ReplicateApiError::MissingToken.value());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predictions"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid token." })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let state = test_state(&server.uri());
        let e = generate_image(&dto(), &state).await.unwrap_err();

        assert_eq!(e, ReplicateApiError::Authentication.value());
    }

    #[tokio::test]
    async fn billing_error_text_maps_to_billing_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predictions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "detail": "Please set up billing to run this model."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let state = test_state(&server.uri());
        let e = generate_image(&dto(), &state).await.unwrap_err();

        assert_eq!(e.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e, ReplicateApiError::Billing.value());
    }

    #[tokio::test]
    async fn failed_prediction_maps_to_prediction_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predictions"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "p2",
                "status": "failed",
                "error": "CUDA out of memory"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let state = test_state(&server.uri());
        let e = generate_image(&dto(), &state).await.unwrap_err();

        assert_eq!(e, ReplicateApiError::PredictionFailed.value());
    }

    #[tokio::test]
    async fn server_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predictions"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .expect(1)
            .mount(&server)
            .await;

        let state = test_state(&server.uri());
        let e = generate_image(&dto(), &state).await.unwrap_err();

        assert_eq!(e.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(e.message.contains("502"));
    }

    #[tokio::test]
    async fn unsettled_prediction_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predictions"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "p4",
                "status": "starting"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/predictions/p4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "p4",
                "status": "processing"
            })))
            .mount(&server)
            .await;

        let mut state = test_state(&server.uri());
        let mut envy = (*state.envy).clone();
        envy.replicate_max_wait_ms = Some(50);
        state.envy = Arc::new(envy);

        let e = generate_image(&dto(), &state).await.unwrap_err();

        assert_eq!(e.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.message, "Prediction p4 timed out");

        let polls = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.method.as_str() == "GET")
            .count();
        assert!(polls >= 1);
    }

    #[tokio::test]
    async fn empty_output_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predictions"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "p3",
                "status": "succeeded",
                "output": []
            })))
            .mount(&server)
            .await;

        let state = test_state(&server.uri());
        let e = generate_image(&dto(), &state).await.unwrap_err();

        assert_eq!(e, ReplicateApiError::NoOutput.value());
    }
}
