use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use shared::AlertState;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::FileList;
use yew::prelude::*;

// Debounce function to limit button events
pub fn debounce<F>(duration: i32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let timeout_clone = Rc::clone(&timeout);

    Callback::from(move |_| {
        let mut timeout_ref = timeout_clone.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        let new_timeout = Timeout::new(duration as u32, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

/// First `image/*` entry of the list, falling back to the first file of any
/// type so the server gets to explain why it is not usable.
pub fn first_image_file(file_list: &FileList) -> Option<GlooFile> {
    let files: Vec<web_sys::File> = (0..file_list.length())
        .filter_map(|i| file_list.item(i))
        .collect();

    files
        .iter()
        .find(|file| file.type_().starts_with("image/"))
        .or_else(|| files.first())
        .cloned()
        .map(GlooFile::from)
}

pub fn render_alert(alert: &AlertState, on_close: Callback<MouseEvent>) -> Html {
    if !alert.visible {
        return html! {};
    }

    html! {
        <div class="modal-backdrop">
            <div class="alert-modal error" role="alertdialog" aria-live="assertive">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ &alert.message }</p>
                <button class="alert-close" onclick={on_close}>{"Close"}</button>
            </div>
        </div>
    }
}

pub fn render_loading_overlay(loading: bool) -> Html {
    if !loading {
        return html! {};
    }

    html! {
        <div class="loading-overlay" aria-busy="true">
            <i class="fa-solid fa-spinner fa-spin fa-3x"></i>
            <p>{"Analyzing your meal..."}</p>
        </div>
    }
}
