use yew::prelude::*;

pub fn render_footer() -> Html {
    html! {
        <footer class="app-footer">
            <p>{"Copyright © 2025 - All rights reserved"}</p>
        </footer>
    }
}
