use yew::prelude::*;

struct Faq {
    question: &'static str,
    answer: &'static str,
}

const FAQS: [Faq; 3] = [
    Faq {
        question: "How do I upload an image to analyze its calories?",
        answer: "Click the 'Upload an image' button, pick a photo of your meal and wait a few seconds while the food is recognised and the calories are added up.",
    },
    Faq {
        question: "What does the calorie report mean?",
        answer: "The report lists the foods detected in the photo you uploaded and the estimated total calories of the whole meal. It helps you keep track of your daily intake.",
    },
    Faq {
        question: "What should I do if my food is not recognised correctly?",
        answer: "Upload clear, well-lit photos focused on the food. If the result is wrong, try again with a new photo for a more accurate analysis.",
    },
];

#[function_component(FaqSection)]
pub fn faq_section() -> Html {
    html! {
        <section class="faq-section">
            <div class="divider"></div>
            <h2>{"How do I use this page?"}</h2>
            { for FAQS.iter().enumerate().map(|(i, faq)| html! {
                <FaqItem key={i} question={faq.question} answer={faq.answer} />
            })}
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct FaqItemProps {
    pub question: &'static str,
    pub answer: &'static str,
}

#[function_component(FaqItem)]
pub fn faq_item(props: &FaqItemProps) -> Html {
    let expanded = use_state(|| false);

    let toggle = {
        let expanded = expanded.clone();
        Callback::from(move |_: MouseEvent| expanded.set(!*expanded))
    };

    html! {
        <div class={classes!("faq-item", (*expanded).then_some("open"))}>
            <button class="faq-question" onclick={toggle} aria-expanded={(*expanded).to_string()}>
                <span>{ props.question }</span>
                <i class={classes!("fa-solid", if *expanded { "fa-minus" } else { "fa-plus" })}></i>
            </button>
            if *expanded {
                <div class="faq-answer">
                    <p>{ props.answer }</p>
                </div>
            }
        </div>
    }
}
