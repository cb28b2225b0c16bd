use quiz_core::model::{StepId, StepKind};

/// Notifications delivered to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new step is on screen; views reset scroll and focus.
    StepEntered {
        index: usize,
        step_id: StepId,
        kind: StepKind,
    },
    SelectionChanged {
        step_id: StepId,
        selected: usize,
    },
    BirthDateChanged,
    LoadingChanged(bool),
    /// The terminal step has been reached.
    Completed,
}
