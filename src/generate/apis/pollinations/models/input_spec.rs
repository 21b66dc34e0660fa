use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;

use crate::{app::models::api_error::ApiError, app::errors::DefaultApiError};

/// Characters `encodeURIComponent` leaves unescaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq)]
pub struct InputSpec {
    pub prompt: String,
    pub width: u16,
    pub height: u16,
    pub seed: i64,
    pub cfg: f32,
    pub steps: u16,
    pub nologo: bool,
}

impl InputSpec {
    /// `<api_url>/prompt/<encoded prompt>?width=..&height=..&seed=..&cfg=..&steps=..&nologo=..`
    pub fn url(&self, api_url: &str) -> Result<Url, ApiError> {
        let mut url = match Url::parse(api_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("invalid pollinations api url {}: {}", api_url, e);
                return Err(DefaultApiError::InternalServerError.value());
            }
        };

        if url.cannot_be_a_base() {
            tracing::error!("pollinations api url {} cannot be a base", api_url);
            return Err(DefaultApiError::InternalServerError.value());
        }

        let path = format!(
            "{}/prompt/{}",
            url.path().trim_end_matches('/'),
            utf8_percent_encode(&self.prompt, URI_COMPONENT)
        );
        url.set_path(&path);

        url.query_pairs_mut()
            .append_pair("width", &self.width.to_string())
            .append_pair("height", &self.height.to_string())
            .append_pair("seed", &self.seed.to_string())
            .append_pair("cfg", &self.cfg.to_string())
            .append_pair("steps", &self.steps.to_string())
            .append_pair("nologo", &self.nologo.to_string());

        Ok(url)
    }
}
