use quiz_core::model::{CheckoutLink, OptionId, SelectionMode, StepDefinition, StepKind};
use services::{FunnelConfig, SessionSnapshot};

use super::option_label::split_label;

const DEFAULT_CONTINUE: &str = "Continuar";

#[derive(Clone, Debug, PartialEq)]
pub struct OptionVm {
    pub id: OptionId,
    pub icon: String,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionVm {
    pub question: String,
    pub hint: Option<String>,
    pub options: Vec<OptionVm>,
    pub multiple: bool,
    pub can_continue: bool,
    pub button: String,
}

/// What the current step looks like on screen.
#[derive(Clone, Debug, PartialEq)]
pub enum StepVm {
    Intro {
        title: String,
        text: String,
        button: String,
    },
    Question(QuestionVm),
    Transition {
        title: String,
        text: String,
        button: String,
    },
    DateInput {
        question: String,
        subtitle: String,
        button: String,
        can_continue: bool,
    },
    Loading {
        title: String,
        text: String,
    },
    PreRevelation {
        title: String,
        text: String,
        button: String,
        checkout: Option<CheckoutLink>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuizVm {
    pub progress_percent: f64,
    pub step: StepVm,
}

fn text_or_empty(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn button_or(value: Option<&str>, fallback: &str) -> String {
    value.unwrap_or(fallback).to_string()
}

/// Builds the view model for `step` as seen in `snapshot`.
///
/// The checkout link is only exposed once the session reports the terminal
/// step as reached. The selection hint follows the configured cap.
#[must_use]
pub fn map_quiz_vm(
    step: &StepDefinition,
    snapshot: &SessionSnapshot,
    config: &FunnelConfig,
) -> QuizVm {
    let step_vm = match step.kind() {
        StepKind::Intro => StepVm::Intro {
            title: text_or_empty(step.title()),
            text: text_or_empty(step.text()),
            button: button_or(step.button_label(), DEFAULT_CONTINUE),
        },
        StepKind::Question => StepVm::Question(map_question(step, snapshot, config.enforce_selection_cap())),
        StepKind::Transition => StepVm::Transition {
            title: text_or_empty(step.title()),
            text: text_or_empty(step.text()),
            button: button_or(step.button_label(), DEFAULT_CONTINUE),
        },
        StepKind::DateInput => StepVm::DateInput {
            question: text_or_empty(step.question_text()),
            subtitle: text_or_empty(step.subtitle()),
            button: button_or(step.button_label(), DEFAULT_CONTINUE),
            can_continue: snapshot.can_advance,
        },
        StepKind::LoadingAnalysis => StepVm::Loading {
            title: text_or_empty(step.title()),
            text: text_or_empty(step.text()),
        },
        StepKind::PreRevelation => StepVm::PreRevelation {
            title: text_or_empty(step.title()),
            text: text_or_empty(step.text()),
            button: button_or(step.button_label(), DEFAULT_CONTINUE),
            checkout: config
                .checkout_url()
                .filter(|_| snapshot.checkout_available)
                .cloned(),
        },
    };

    QuizVm {
        progress_percent: snapshot.progress.percent(),
        step: step_vm,
    }
}

fn map_question(step: &StepDefinition, snapshot: &SessionSnapshot, capped: bool) -> QuestionVm {
    let (multiple, hint) = match step.selection_mode() {
        SelectionMode::Single => (false, None),
        SelectionMode::Multiple { max } => (
            true,
            max.filter(|_| capped).map(|max| format!("Escolha até {max} áreas.")),
        ),
    };
    let options = step
        .options()
        .iter()
        .map(|option| {
            let (icon, text) = split_label(option);
            OptionVm {
                id: option.id().clone(),
                icon,
                text,
                selected: snapshot.is_selected(option.id()),
            }
        })
        .collect();

    QuestionVm {
        question: text_or_empty(step.question_text()),
        hint,
        options,
        multiple,
        can_continue: snapshot.can_advance,
        button: button_or(step.button_label(), DEFAULT_CONTINUE),
    }
}
