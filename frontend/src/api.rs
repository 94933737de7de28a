use gloo_net::http::Request;
use shared::{AnalysisError, DetectFoodRequest, DetectFoodResponse, DetectionResult, EncodedImage};
use web_sys::AbortSignal;

/// Sends one image to `POST /api/detect_food`.
///
/// Anything other than a 2xx answer carrying a well-formed body is reported
/// as [`AnalysisError::Transport`]; the server's own detail is only logged.
pub async fn detect_food(
    image: &EncodedImage,
    abort: Option<&AbortSignal>,
) -> Result<DetectionResult, AnalysisError> {
    let request = Request::post(shared::DETECT_FOOD_PATH)
        .abort_signal(abort)
        .json(&DetectFoodRequest::new(image))
        .map_err(|e| AnalysisError::Transport(format!("Failed to build request: {}", e)))?;

    let response = request
        .send()
        .await
        .map_err(|e| AnalysisError::Transport(format!("Network error: {}", e)))?;

    let ok = response.ok();
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AnalysisError::Transport(format!("Failed to read response: {}", e)))?;

    DetectFoodResponse::outcome_from_http(ok, status, &body)
}
