use serde::{Deserialize, Serialize};

use crate::model::ids::{OptionId, StepId};

//
// ─── STEP KIND ────────────────────────────────────────────────────────────────
//

/// Closed set of step kinds.
///
/// The kind decides which fields of a `StepDefinition` are meaningful and
/// which gate applies when the session tries to move past the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepKind {
    Intro,
    Question,
    Transition,
    DateInput,
    LoadingAnalysis,
    PreRevelation,
}

impl StepKind {
    /// Stable machine name, matching the catalog wire format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Intro => "INTRO",
            StepKind::Question => "QUESTION",
            StepKind::Transition => "TRANSITION",
            StepKind::DateInput => "DATE_INPUT",
            StepKind::LoadingAnalysis => "LOADING_ANALYSIS",
            StepKind::PreRevelation => "PRE_REVELATION",
        }
    }
}

//
// ─── OPTION ───────────────────────────────────────────────────────────────────
//

/// One selectable answer on a question step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    id: OptionId,
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
}

impl QuizOption {
    #[must_use]
    pub fn new(id: OptionId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            icon: None,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &OptionId {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}

//
// ─── SELECTION MODE ───────────────────────────────────────────────────────────
//

/// How options on a question step may be chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Exactly one option; choosing it schedules the auto-advance.
    Single,
    /// Toggle any number of options, optionally capped.
    Multiple { max: Option<usize> },
}

//
// ─── STEP DEFINITION ──────────────────────────────────────────────────────────
//

/// One entry of the step catalog.
///
/// Display fields are carried for the presentation layer; the session
/// controller only looks at `id`, `kind`, `options` and the selection rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDefinition {
    id: StepId,
    #[serde(rename = "type")]
    kind: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    question: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<QuizOption>,
    #[serde(default, rename = "multiple", skip_serializing_if = "std::ops::Not::not")]
    allows_multiple: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_selections: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    button_label: Option<String>,
}

impl StepDefinition {
    /// Creates a bare step of the given kind with no display content.
    #[must_use]
    pub fn new(id: StepId, kind: StepKind) -> Self {
        Self {
            id,
            kind,
            title: None,
            subtitle: None,
            text: None,
            question: None,
            options: Vec::new(),
            allows_multiple: false,
            max_selections: None,
            button_label: None,
        }
    }

    /// Shorthand for a question step with the given options.
    #[must_use]
    pub fn question(id: StepId, question: impl Into<String>, options: Vec<QuizOption>) -> Self {
        Self::new(id, StepKind::Question)
            .with_question(question)
            .with_options(options)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: Vec<QuizOption>) -> Self {
        self.options = options;
        self
    }

    /// Marks the step as multi-select, optionally capping concurrent choices.
    #[must_use]
    pub fn allowing_multiple(mut self, max_selections: Option<u32>) -> Self {
        self.allows_multiple = true;
        self.max_selections = max_selections;
        self
    }

    #[must_use]
    pub fn with_button_label(mut self, label: impl Into<String>) -> Self {
        self.button_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> StepId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> StepKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn question_text(&self) -> Option<&str> {
        self.question.as_deref()
    }

    #[must_use]
    pub fn options(&self) -> &[QuizOption] {
        &self.options
    }

    #[must_use]
    pub fn allows_multiple(&self) -> bool {
        self.allows_multiple
    }

    #[must_use]
    pub fn max_selections(&self) -> Option<u32> {
        self.max_selections
    }

    #[must_use]
    pub fn button_label(&self) -> Option<&str> {
        self.button_label.as_deref()
    }

    /// Returns true if `option_id` is one of this step's options.
    #[must_use]
    pub fn has_option(&self, option_id: &OptionId) -> bool {
        self.options.iter().any(|option| option.id() == option_id)
    }

    /// Selection rule for question steps. `maxSelections` is ignored on single-select steps.
    #[must_use]
    pub fn selection_mode(&self) -> SelectionMode {
        if self.allows_multiple {
            SelectionMode::Multiple {
                max: self
                    .max_selections
                    .map(|max| usize::try_from(max).unwrap_or(usize::MAX)),
            }
        } else {
            SelectionMode::Single
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: &str) -> QuizOption {
        QuizOption::new(OptionId::new(id).unwrap(), format!("🌱 {id}"))
    }

    #[test]
    fn single_select_ignores_max_selections() {
        let mut step = StepDefinition::question(StepId::new(2), "Q?", vec![option("a")]);
        step.max_selections = Some(3);
        assert_eq!(step.selection_mode(), SelectionMode::Single);
    }

    #[test]
    fn multi_select_carries_cap() {
        let step = StepDefinition::question(StepId::new(3), "Q?", vec![option("a"), option("b")])
            .allowing_multiple(Some(2));
        assert_eq!(step.selection_mode(), SelectionMode::Multiple { max: Some(2) });
        assert!(step.has_option(&OptionId::new("b").unwrap()));
        assert!(!step.has_option(&OptionId::new("z").unwrap()));
    }

    #[test]
    fn deserializes_catalog_wire_format() {
        let raw = r#"{
            "id": 3,
            "type": "QUESTION",
            "question": "Em qual dessas áreas?",
            "multiple": true,
            "maxSelections": 2,
            "options": [
                { "id": "money", "label": "💰 Dinheiro" },
                { "id": "love", "label": "❤️ Amor" }
            ],
            "buttonLabel": "Continuar"
        }"#;
        let step: StepDefinition = serde_json::from_str(raw).unwrap();
        assert_eq!(step.id(), StepId::new(3));
        assert_eq!(step.kind(), StepKind::Question);
        assert_eq!(step.options().len(), 2);
        assert_eq!(step.selection_mode(), SelectionMode::Multiple { max: Some(2) });
        assert_eq!(step.button_label(), Some("Continuar"));
    }

    #[test]
    fn kind_names_match_wire_format() {
        let kind: StepKind = serde_json::from_str("\"LOADING_ANALYSIS\"").unwrap();
        assert_eq!(kind, StepKind::LoadingAnalysis);
        assert_eq!(kind.as_str(), "LOADING_ANALYSIS");
    }
}
