use log::{debug, error};
use reqwest::Client as HttpClient;
use shared::{DetectFoodRequest, DetectFoodResponse};
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Detector returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Client for the upstream food detection service.
#[derive(Clone)]
pub struct DetectorClient {
    http_client: HttpClient,
    endpoint: Url,
}

impl DetectorClient {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, DetectorError> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self { http_client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn detect(
        &self,
        request: &DetectFoodRequest,
    ) -> Result<DetectFoodResponse, DetectorError> {
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Detector at {} answered {}: {}", self.endpoint, status, body);
            return Err(DetectorError::Status { status: status.as_u16(), body });
        }

        let body = response.bytes().await?;
        debug!("Detector response: {} bytes", body.len());
        let parsed: DetectFoodResponse = serde_json::from_slice(&body)?;
        Ok(parsed)
    }
}
