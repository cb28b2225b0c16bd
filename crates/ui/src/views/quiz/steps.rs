use dioxus::prelude::*;

use quiz_core::model::{CheckoutLink, OptionId};

use crate::vm::{BirthDateError, OptionVm, QuestionVm};

#[component]
pub(super) fn ProgressBar(percent: f64) -> Element {
    let width = format!("width: {percent:.1}%");
    rsx! {
        div {
            class: "quiz-progress",
            role: "progressbar",
            aria_valuemin: "0",
            aria_valuemax: "100",
            aria_valuenow: "{percent:.0}",
            div { class: "quiz-progress-fill", style: "{width}" }
        }
    }
}

#[component]
pub(super) fn NarrativeStep(
    title: String,
    text: String,
    button: String,
    on_continue: Callback<()>,
) -> Element {
    rsx! {
        section { class: "quiz-step quiz-step--narrative",
            h1 { class: "quiz-title", "{title}" }
            p { class: "quiz-text", "{text}" }
            button {
                id: "quiz-continue",
                class: "quiz-button",
                r#type: "button",
                "data-autofocus": "true",
                onclick: move |_| on_continue.call(()),
                "{button}"
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, multiple: bool, on_select: Callback<OptionId>) -> Element {
    let class = if option.selected {
        "quiz-option quiz-option--selected"
    } else {
        "quiz-option"
    };
    let role = if multiple { "checkbox" } else { "radio" };
    let id = option.id.clone();
    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            role: "{role}",
            aria_checked: "{option.selected}",
            "data-option": "{option.id}",
            onclick: move |_| on_select.call(id.clone()),
            if !option.icon.is_empty() {
                span { class: "quiz-option-icon", "{option.icon}" }
            }
            span { class: "quiz-option-text", "{option.text}" }
        }
    }
}

#[component]
pub(super) fn QuestionStep(
    question: QuestionVm,
    on_select: Callback<OptionId>,
    on_continue: Callback<()>,
) -> Element {
    let multiple = question.multiple;
    let group_role = if multiple { "group" } else { "radiogroup" };
    rsx! {
        section { class: "quiz-step quiz-step--question",
            h2 { class: "quiz-question", "{question.question}" }
            if let Some(hint) = question.hint.as_deref() {
                p { class: "quiz-hint", "{hint}" }
            }
            div {
                class: "quiz-options",
                role: "{group_role}",
                for option in question.options.iter().cloned() {
                    OptionButton {
                        key: "{option.id}",
                        option,
                        multiple,
                        on_select,
                    }
                }
            }
            // Single-select steps move on by themselves.
            if multiple {
                button {
                    id: "quiz-continue",
                    class: "quiz-button",
                    r#type: "button",
                    disabled: !question.can_continue,
                    onclick: move |_| on_continue.call(()),
                    "{question.button}"
                }
            }
        }
    }
}

#[component]
pub(super) fn DateStep(
    question: String,
    subtitle: String,
    button: String,
    value: String,
    error: Option<BirthDateError>,
    can_continue: bool,
    on_input: Callback<String>,
    on_continue: Callback<()>,
) -> Element {
    rsx! {
        section { class: "quiz-step quiz-step--date",
            h2 { class: "quiz-question", "{question}" }
            p { class: "quiz-subtitle", "{subtitle}" }
            input {
                id: "quiz-birth-date",
                class: "quiz-date-input",
                r#type: "date",
                value: "{value}",
                "data-autofocus": "true",
                oninput: move |evt| on_input.call(evt.value()),
            }
            if let Some(error) = error {
                p { class: "quiz-error", role: "alert", "{error.message()}" }
            }
            button {
                id: "quiz-continue",
                class: "quiz-button",
                r#type: "button",
                disabled: !can_continue,
                onclick: move |_| on_continue.call(()),
                "{button}"
            }
        }
    }
}

#[component]
pub(super) fn LoadingStep(title: String, text: String) -> Element {
    rsx! {
        section { class: "quiz-step quiz-step--loading", aria_busy: "true",
            div { class: "quiz-spinner" }
            h2 { class: "quiz-title", "{title}" }
            p { class: "quiz-text", "{text}" }
        }
    }
}

#[component]
pub(super) fn PreRevelationStep(
    title: String,
    text: String,
    button: String,
    checkout: Option<CheckoutLink>,
    on_checkout: Callback<CheckoutLink>,
) -> Element {
    rsx! {
        section { class: "quiz-step quiz-step--reveal",
            h1 { class: "quiz-title", "{title}" }
            p { class: "quiz-text", "{text}" }
            match checkout {
                Some(link) => rsx! {
                    button {
                        id: "quiz-checkout",
                        class: "quiz-button quiz-button--cta",
                        r#type: "button",
                        "data-autofocus": "true",
                        onclick: move |_| on_checkout.call(link.clone()),
                        "{button}"
                    }
                },
                None => rsx! {},
            }
        }
    }
}
