use super::super::{Model, Msg};
use super::utils::first_image_file;
use crate::api;
use gloo_file::File as GlooFile;
use shared::{
    AnalysisError, DetectionResult, EncodedImage, ReadError, UploadTicket, WorkflowEvent,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{AbortController, ClipboardEvent, DragEvent};
use yew::prelude::*;

/// Replaces the workflow state; returns whether anything visible changed.
fn apply(model: &mut Model, event: WorkflowEvent) -> bool {
    let next = model.workflow.reduce(event);
    let changed = next != model.workflow;
    model.workflow = next;
    changed
}

pub fn handle_file_selected(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    let changed = apply(model, WorkflowEvent::UploadStarted);
    let ticket = model.workflow.latest_ticket();

    if let Some(controller) = model.in_flight.take() {
        log::info!("Upload {} supersedes the pending analysis", ticket);
        controller.abort();
    }

    log::info!("Upload {}: reading {} ({} bytes)", ticket, file.name(), file.size());
    read_image(ctx, ticket, file);
    changed
}

fn read_image(ctx: &Context<Model>, ticket: UploadTicket, file: GlooFile) {
    let link = ctx.link().clone();
    spawn_local(async move {
        let mime_type = file.raw_mime_type();
        let encoded = gloo_file::futures::read_as_bytes(&file)
            .await
            .map_err(|e| ReadError::Read(e.to_string()))
            .and_then(|bytes| EncodedImage::encode(&mime_type, &bytes));
        link.send_message(Msg::ImageEncoded(ticket, encoded));
    });
}

pub fn handle_image_encoded(
    model: &mut Model,
    ctx: &Context<Model>,
    ticket: UploadTicket,
    encoded: Result<EncodedImage, ReadError>,
) -> bool {
    match encoded {
        Ok(image) => {
            let changed = apply(model, WorkflowEvent::ImageEncoded { ticket, image: image.clone() });
            if model.workflow.is_current(ticket) {
                send_analysis_request(model, ctx, ticket, image);
            }
            changed
        }
        Err(error) => {
            log::error!("Error reading file for upload {}: {}", ticket, error);
            apply(model, WorkflowEvent::ReadFailed { ticket, error })
        }
    }
}

fn send_analysis_request(
    model: &mut Model,
    ctx: &Context<Model>,
    ticket: UploadTicket,
    image: EncodedImage,
) {
    let controller = AbortController::new()
        .map_err(|e| log::warn!("AbortController unavailable: {:?}", e))
        .ok();
    let signal = controller.as_ref().map(AbortController::signal);
    model.in_flight = controller;

    let link = ctx.link().clone();
    spawn_local(async move {
        let outcome = api::detect_food(&image, signal.as_ref()).await;
        link.send_message(Msg::AnalysisFinished(ticket, outcome));
    });
}

pub fn handle_analysis_finished(
    model: &mut Model,
    ticket: UploadTicket,
    outcome: Result<DetectionResult, AnalysisError>,
) -> bool {
    if !model.workflow.is_current(ticket) {
        log::debug!("Dropping outcome of superseded upload {}", ticket);
        return false;
    }
    model.in_flight = None;

    match &outcome {
        Ok(result) => log::info!("Upload {}: {} item(s) detected", ticket, result.items.len()),
        Err(AnalysisError::Transport(detail)) => log::error!("Upload {}: {}", ticket, detail),
        Err(AnalysisError::Rejected(message)) => {
            log::warn!("Upload {} rejected by server: {}", ticket, message)
        }
    }

    apply(model, WorkflowEvent::AnalysisFinished { ticket, outcome })
}

pub fn handle_dismiss_alert(model: &mut Model) -> bool {
    apply(model, WorkflowEvent::AlertDismissed)
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    let file = event
        .data_transfer()
        .and_then(|data_transfer| data_transfer.files())
        .and_then(|file_list| first_image_file(&file_list));

    match file {
        Some(file) => ctx.link().send_message(Msg::FileSelected(file)),
        None => log::warn!("Drop contained no files"),
    }

    true
}

pub fn handle_paste(ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    let file = event
        .clipboard_data()
        .and_then(|data_transfer| data_transfer.files())
        .and_then(|file_list| first_image_file(&file_list));

    if let Some(file) = file {
        event.prevent_default();
        ctx.link().send_message(Msg::FileSelected(file));
    }
    false
}
