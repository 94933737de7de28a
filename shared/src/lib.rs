use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod data_url;
pub mod workflow;

pub use data_url::{DataUrlError, EncodedImage, ReadError};
pub use workflow::{AlertState, UploadTicket, WorkflowEvent, WorkflowState, WorkflowStatus};

pub const DETECT_FOOD_PATH: &str = "/api/detect_food";

/// Shown for every failure that is not a server-reported rejection.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to analyze the image. Please try again.";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DetectFoodRequest {
    pub image: String,
}

impl DetectFoodRequest {
    pub fn new(image: &EncodedImage) -> Self {
        Self { image: image.as_str().to_string() }
    }
}

/// Body returned by `POST /api/detect_food`.
///
/// `count` carries the total calories, not the number of items. The name is
/// part of the contract with the detector and must not change.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DetectFoodResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DetectFoodResponse {
    pub fn detected(result: &DetectionResult) -> Self {
        Self {
            success: true,
            items: Some(result.items.clone()),
            count: Some(result.total_calories),
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            items: None,
            count: None,
            message: Some(message.into()),
        }
    }

    /// Interprets a raw HTTP answer from `POST /api/detect_food`.
    ///
    /// A non-2xx status is a transport failure even when its body is a valid
    /// `{success:false,message}`; only the detail log sees the server text.
    pub fn outcome_from_http(
        ok: bool,
        status: u16,
        body: &str,
    ) -> Result<DetectionResult, AnalysisError> {
        if !ok {
            return Err(AnalysisError::Transport(format!("Server error: {} - {}", status, body)));
        }
        serde_json::from_str::<DetectFoodResponse>(body)
            .map_err(|e| AnalysisError::Transport(format!("Failed to parse response: {}", e)))?
            .into_outcome()
    }

    /// Interprets the body. A body missing the fields its `success` flag
    /// promises is treated like any other transport failure.
    pub fn into_outcome(self) -> Result<DetectionResult, AnalysisError> {
        match self {
            Self { success: true, items: Some(items), count: Some(total_calories), .. } => {
                Ok(DetectionResult { items, total_calories })
            }
            Self { success: false, message: Some(message), .. } => {
                Err(AnalysisError::Rejected(message))
            }
            Self { success, .. } => Err(AnalysisError::Transport(format!(
                "malformed response body (success = {})",
                success
            ))),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DetectionResult {
    pub items: Vec<String>,
    pub total_calories: f64,
}

impl DetectionResult {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total as shown in the result panel, e.g. `250 cal`.
    pub fn calories_label(&self) -> String {
        format!("{} cal", self.total_calories)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("{0}")]
    Rejected(String),
}

impl AnalysisError {
    pub fn alert_message(&self) -> &str {
        match self {
            AnalysisError::Transport(_) => TRANSPORT_FAILURE_MESSAGE,
            AnalysisError::Rejected(message) => message,
        }
    }
}
