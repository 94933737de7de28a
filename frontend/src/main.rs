mod api;
mod components;

use components::faq::FaqSection;
use components::footer::render_footer;
use components::handlers;
use components::header::{render_header, render_usage_notice};
use components::results::render_result_panel;
use components::upload_section::render_upload_section;
use components::utils::{render_alert, render_loading_overlay};
use gloo_events::EventListener;
use gloo_file::File as GlooFile;
use shared::{AnalysisError, DetectionResult, EncodedImage, ReadError, UploadTicket, WorkflowState};
use wasm_bindgen::JsCast;
use web_sys::{AbortController, ClipboardEvent, DragEvent};
use yew::prelude::*;

// Yew msg components
pub enum Msg {
    // Upload workflow
    FileSelected(GlooFile),
    ImageEncoded(UploadTicket, Result<EncodedImage, ReadError>),
    AnalysisFinished(UploadTicket, Result<DetectionResult, AnalysisError>),
    DismissAlert,

    // UI states
    SetDragging(bool),

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

// Main component
pub struct Model {
    workflow: WorkflowState,
    is_dragging: bool,
    paste_listener: Option<EventListener>,
    in_flight: Option<AbortController>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut model = Self {
            workflow: WorkflowState::new(),
            is_dragging: false,
            paste_listener: None,
            in_flight: None,
        };

        let link = ctx.link().clone();
        if let Some(window) = web_sys::window() {
            let listener = EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            });
            model.paste_listener = Some(listener);
        }

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileSelected(file) => handlers::handle_file_selected(self, ctx, file),
            Msg::ImageEncoded(ticket, encoded) => {
                handlers::handle_image_encoded(self, ctx, ticket, encoded)
            }
            Msg::AnalysisFinished(ticket, outcome) => {
                handlers::handle_analysis_finished(self, ticket, outcome)
            }
            Msg::DismissAlert => handlers::handle_dismiss_alert(self),

            Msg::SetDragging(is_dragging) => {
                let changed = self.is_dragging != is_dragging;
                self.is_dragging = is_dragging;
                changed
            }

            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div class={classes!("container", self.workflow.status.as_ref().to_owned())}>
                { render_header() }
                { render_usage_notice() }
                <FaqSection />

                <main class="main-content">
                    <h2 class="section-title">{"Calorie Analysis"}</h2>
                    <div class="analysis-layout">
                        { render_upload_section(self.workflow.image.as_ref(), self.is_dragging, link) }
                        { render_result_panel(&self.workflow.result) }
                    </div>
                </main>

                { render_loading_overlay(self.workflow.is_loading()) }
                { render_alert(&self.workflow.alert, link.callback(|_| Msg::DismissAlert)) }
                { render_footer() }
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(controller) = self.in_flight.take() {
            controller.abort();
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
