use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct InputSpecImage {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    pub seed: i64,
    pub guidance_scale: f32,
    pub num_inference_steps: u16,
    pub width: u16,
    pub height: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_guidance_scale: Option<f32>,
}
