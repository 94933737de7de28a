use super::super::{Model, Msg};
use super::preview_area::render_image_preview;
use super::utils::{debounce, first_image_file};
use shared::EncodedImage;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::html::Scope;
use yew::prelude::*;

const FILE_INPUT_ID: &str = "upload";

pub fn render_upload_section(
    image: Option<&EncodedImage>,
    is_dragging: bool,
    link: &Scope<Model>,
) -> Html {
    html! {
        <div class="upload-section">
            { render_file_input(link) }
            { render_drop_zone(image, is_dragging, link) }
        </div>
    }
}

fn render_file_input(link: &Scope<Model>) -> Html {
    let link = link.clone();
    let handle_change = Callback::from(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().as_ref().and_then(first_image_file);

        // Allows re-selecting the same file.
        input.set_value("");

        if let Some(file) = file {
            link.send_message(Msg::FileSelected(file));
        }
    });

    html! {
        <>
            <input
                type="file"
                id={FILE_INPUT_ID}
                accept="image/*"
                style="display: none;"
                onchange={handle_change}
            />

            <button
                id="upload-button"
                class="upload-btn"
                onclick={debounce(300, trigger_file_input)}
            >
                <i class="fa-solid fa-upload"></i> {" Upload an image"}
            </button>
        </>
    }
}

fn render_drop_zone(image: Option<&EncodedImage>, is_dragging: bool, link: &Scope<Model>) -> Html {
    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);

    html! {
        <div
            id="drop-zone"
            class={classes!("upload-area", is_dragging.then_some("drag-over"))}
            ondragover={handle_drag_over}
            ondragleave={handle_drag_leave}
            ondrop={handle_drop}
            onclick={debounce(300, trigger_file_input)}
        >
            { render_image_preview(image) }
        </div>
    }
}

fn trigger_file_input() {
    let input = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(FILE_INPUT_ID));

    if let Some(input) = input {
        if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
            html_input.click();
        }
    }
}
