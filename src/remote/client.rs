use crate::config::Config;
use crate::error::ClientError;
use reqwest::{Response, Url};
use serde_json::Value;
use tracing::warn;

pub const API_PREFIX: &str = "polling_api";

/// HTTP handle on the polling API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(super) http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        Ok(Self::with_base_url(config.base_url()?))
    }

    pub fn with_base_url(base: Url) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `{base}/polling_api/{segments...}/`. Segments are percent-encoded, so titles
    /// with spaces or slashes stay a single path segment.
    pub(super) fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ClientError::Config(format!("{} cannot be used as a base URL", self.base))
            })?;
            path.pop_if_empty().push(API_PREFIX).extend(segments).push("");
        }
        Ok(url)
    }
}

/// Pulls the server's human-readable `detail` out of an error response, if there is one.
pub(super) async fn error_detail(response: Response) -> Option<String> {
    let body = match response.json::<Value>().await {
        Ok(body) => body,
        Err(e) => {
            warn!("Error response had no JSON body: {e}");
            return None;
        }
    };

    match body.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => Some(detail.clone()),
        Some(Value::String(_) | Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}

pub(super) async fn json_body(response: Response) -> Result<Value, ClientError> {
    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes)
        .map_err(|e| ClientError::MalformedPollData(format!("response is not JSON: {e}")))
}
