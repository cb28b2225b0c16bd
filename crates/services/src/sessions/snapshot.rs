use serde::Serialize;

use quiz_core::model::{OptionId, SessionState, StepId, StepKind, StepProgress};

/// Read-only copy of a session, published after every state change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub step_id: StepId,
    pub kind: StepKind,
    pub selection: Vec<OptionId>,
    pub progress: StepProgress,
    pub can_advance: bool,
    pub auto_advance_pending: bool,
    pub checkout_available: bool,
}

impl SessionSnapshot {
    #[must_use]
    pub fn current_step_index(&self) -> usize {
        self.state.current_step_index()
    }

    #[must_use]
    pub fn is_selected(&self, id: &OptionId) -> bool {
        self.selection.contains(id)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }
}
