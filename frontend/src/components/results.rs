use shared::DetectionResult;
use yew::prelude::*;

pub fn render_result_panel(result: &DetectionResult) -> Html {
    if result.is_empty() {
        return html! {
            <div class="results-container empty">
                <h2 class="result-header">{"Your meal's calorie report"}</h2>
            </div>
        };
    }

    html! {
        <div class="results-container">
            <div class="detected-items">
                <h2 class="result-header">{"Detected Food Items"}</h2>
                <div class="item-tags">
                    { for result.items.iter().enumerate().map(|(i, item)| html! {
                        <span key={i} class="item-tag">{ item }</span>
                    })}
                </div>
            </div>
            <div class="divider"></div>
            <div class="calorie-total">
                <h3>{"Total Calories:"}</h3>
                <p class="calorie-value">{ result.calories_label() }</p>
            </div>
        </div>
    }
}
