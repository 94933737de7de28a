use shared::EncodedImage;
use yew::prelude::*;

pub fn render_image_preview(image: Option<&EncodedImage>) -> Html {
    match image {
        Some(image) => html! {
            <img id="actual-image-preview"
                class="image-preview"
                src={image.as_str().to_string()}
                alt="Uploaded food" />
        },
        None => html! {
            <div class="upload-placeholder">
                <i class="fa-solid fa-cloud-arrow-up"></i>
                <p>{"Select an image"}</p>
                <p class="hint">{"Your meal report will appear in the panel on the right"}</p>
                <p class="file-types">{"Drag & drop, paste, or click to choose a photo"}</p>
            </div>
        },
    }
}
