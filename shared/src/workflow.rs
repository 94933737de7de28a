//! Upload/analyze state machine.
//!
//! The page keeps a single [`WorkflowState`] and replaces it with the value
//! returned by [`WorkflowState::reduce`] for every event. Each upload is
//! identified by an [`UploadTicket`]; events for anything but the latest
//! ticket are dropped, so a superseded request can never overwrite the result
//! of a newer one.

use crate::data_url::{EncodedImage, ReadError};
use crate::{AnalysisError, DetectionResult};
use derive_more::{Display, From};
use strum_macros::{AsRefStr, Display as StrumDisplay};

pub const READ_FAILURE_MESSAGE: &str =
    "Could not read the selected image. Please choose another file.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, StrumDisplay, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum WorkflowStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertState {
    pub visible: bool,
    pub message: String,
}

impl AlertState {
    fn show(message: impl Into<String>) -> Self {
        Self { visible: true, message: message.into() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Display, From)]
#[display(fmt = "#{}", _0)]
pub struct UploadTicket(u64);

impl UploadTicket {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// A file was picked, dropped or pasted. Issues a fresh ticket.
    UploadStarted,
    ImageEncoded { ticket: UploadTicket, image: EncodedImage },
    ReadFailed { ticket: UploadTicket, error: ReadError },
    AnalysisFinished {
        ticket: UploadTicket,
        outcome: Result<DetectionResult, AnalysisError>,
    },
    AlertDismissed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    pub image: Option<EncodedImage>,
    pub result: DetectionResult,
    pub status: WorkflowStatus,
    pub alert: AlertState,
    latest: UploadTicket,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket of the most recent upload; valid right after `UploadStarted`.
    pub fn latest_ticket(&self) -> UploadTicket {
        self.latest
    }

    pub fn is_loading(&self) -> bool {
        self.status == WorkflowStatus::Loading
    }

    pub fn is_current(&self, ticket: UploadTicket) -> bool {
        ticket == self.latest
    }

    pub fn reduce(&self, event: WorkflowEvent) -> WorkflowState {
        let mut next = self.clone();
        match event {
            WorkflowEvent::UploadStarted => {
                next.latest = self.latest.next();
            }
            WorkflowEvent::ImageEncoded { ticket, image } if self.is_current(ticket) => {
                next.image = Some(image);
                next.result = DetectionResult::default();
                next.status = WorkflowStatus::Loading;
            }
            WorkflowEvent::ReadFailed { ticket, .. } if self.is_current(ticket) => {
                next.image = None;
                next.result = DetectionResult::default();
                next.status = WorkflowStatus::Error;
                next.alert = AlertState::show(READ_FAILURE_MESSAGE);
            }
            WorkflowEvent::AnalysisFinished { ticket, outcome }
                if self.is_current(ticket) && self.is_loading() =>
            {
                match outcome {
                    Ok(result) => {
                        next.result = result;
                        next.status = WorkflowStatus::Success;
                    }
                    Err(error) => {
                        next.status = WorkflowStatus::Error;
                        next.alert = AlertState::show(error.alert_message());
                    }
                }
            }
            WorkflowEvent::AlertDismissed => {
                next.alert.visible = false;
            }
            // stale ticket, or nothing in flight
            _ => {}
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> EncodedImage {
        "data:image/png;base64,AAA".parse().unwrap()
    }

    fn loading() -> WorkflowState {
        let state = WorkflowState::new().reduce(WorkflowEvent::UploadStarted);
        let ticket = state.latest_ticket();
        state.reduce(WorkflowEvent::ImageEncoded { ticket, image: image() })
    }

    #[test]
    fn starts_idle_and_empty() {
        let state = WorkflowState::new();
        assert_eq!(state.status, WorkflowStatus::Idle);
        assert!(state.image.is_none());
        assert!(state.result.is_empty());
        assert!(!state.alert.visible);
    }

    #[test]
    fn upload_started_only_advances_ticket() {
        let state = WorkflowState::new();
        let next = state.reduce(WorkflowEvent::UploadStarted);
        assert!(next.latest_ticket() > state.latest_ticket());
        assert_eq!(next.status, state.status);
        assert_eq!(next.image, state.image);
    }

    #[test]
    fn encoded_image_enters_loading_and_clears_result() {
        let mut state = loading();
        state = state.reduce(WorkflowEvent::AnalysisFinished {
            ticket: state.latest_ticket(),
            outcome: Ok(DetectionResult { items: vec!["rice".into()], total_calories: 200.0 }),
        });
        state = state.reduce(WorkflowEvent::UploadStarted);
        let ticket = state.latest_ticket();
        let state = state.reduce(WorkflowEvent::ImageEncoded { ticket, image: image() });
        assert!(state.is_loading());
        assert!(state.result.is_empty());
    }

    #[test]
    fn read_failure_is_surfaced() {
        let state = WorkflowState::new().reduce(WorkflowEvent::UploadStarted);
        let state = state.reduce(WorkflowEvent::ReadFailed {
            ticket: state.latest_ticket(),
            error: ReadError::Read("NotReadableError".into()),
        });
        assert_eq!(state.status, WorkflowStatus::Error);
        assert!(state.alert.visible);
        assert_eq!(state.alert.message, READ_FAILURE_MESSAGE);
    }

    #[test]
    fn read_failure_clears_previous_upload() {
        let state = loading();
        let state = state.reduce(WorkflowEvent::AnalysisFinished {
            ticket: state.latest_ticket(),
            outcome: Ok(DetectionResult { items: vec!["pasta".into()], total_calories: 640.0 }),
        });
        let state = state.reduce(WorkflowEvent::UploadStarted);
        let state = state.reduce(WorkflowEvent::ReadFailed {
            ticket: state.latest_ticket(),
            error: ReadError::Empty,
        });
        assert_eq!(state.status, WorkflowStatus::Error);
        assert!(state.image.is_none());
        assert!(state.result.is_empty());
    }

    #[test]
    fn outcome_outside_loading_is_ignored() {
        let state = WorkflowState::new().reduce(WorkflowEvent::UploadStarted);
        let next = state.reduce(WorkflowEvent::AnalysisFinished {
            ticket: state.latest_ticket(),
            outcome: Ok(DetectionResult::default()),
        });
        assert_eq!(next, state);
    }

    #[test]
    fn status_names_are_lowercase() {
        assert_eq!(WorkflowStatus::Loading.to_string(), "loading");
        assert_eq!(WorkflowStatus::Error.as_ref(), "error");
    }

    #[test]
    fn ticket_display() {
        assert_eq!(UploadTicket::from(3).to_string(), "#3");
    }
}
