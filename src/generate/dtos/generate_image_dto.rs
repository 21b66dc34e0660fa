use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageDto {
    #[validate(length(max = 2000, message = "prompt must be at most 2000 characters."))]
    pub prompt: Option<String>,
    pub negative_prompt: Option<String>,
    pub style: Option<String>,
    pub model: Option<String>,
    pub aspect_ratio: Option<String>,
    pub seed: Option<i64>,
    pub cfg_scale: Option<f32>,
    pub steps: Option<u16>,
    #[serde(alias = "sourceImage")]
    pub uploaded_image_url: Option<String>,
    #[validate(range(min = 0.0, max = 1.0, message = "imageStrength must be between 0 and 1."))]
    pub image_strength: Option<f32>,
    pub provider: Option<String>,
}

impl GenerateImageDto {
    /// Blank strings and zero-valued knobs count as absent. Prompt text is
    /// forwarded exactly as sent; only tags are trimmed.
    pub fn sanitized(&self) -> Self {
        Self {
            prompt: non_blank_verbatim(&self.prompt),
            negative_prompt: non_blank_verbatim(&self.negative_prompt),
            style: non_blank(&self.style),
            model: non_blank(&self.model),
            aspect_ratio: non_blank(&self.aspect_ratio),
            seed: self.seed.filter(|seed| *seed != 0),
            cfg_scale: self.cfg_scale.filter(|cfg| *cfg != 0.0),
            steps: self.steps.filter(|steps| *steps != 0),
            uploaded_image_url: non_blank_verbatim(&self.uploaded_image_url),
            image_strength: self.image_strength,
            provider: non_blank(&self.provider).map(|p| p.to_lowercase()),
        }
    }
}

fn non_blank_verbatim(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.trim().is_empty())
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}
