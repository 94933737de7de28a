use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-utensils"></i> {" Calorie Lens"}</h1>
            <p class="subtitle">{"Upload a photo of your meal to see what is on the plate and how many calories it has"}</p>
        </header>
    }
}

pub fn render_usage_notice() -> Html {
    html! {
        <div class="info-notice" role="note">
            <i class="fa-solid fa-circle-info"></i>
            <span>
                {"This is a free tool, so only two images can be analyzed per minute. If you get an error, wait a minute and try again."}
            </span>
        </div>
    }
}
