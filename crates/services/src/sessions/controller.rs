use std::fmt;

use tracing::{debug, trace};

use quiz_core::model::{
    BirthDate, OptionId, SelectionBuffer, SelectionMode, SessionId, SessionState, StepCatalog,
    StepDefinition, StepKind, StepProgress, Toggle,
};

use super::events::SessionEvent;
use super::snapshot::SessionSnapshot;
use super::timer::{PendingTimer, TimerPurpose, TimerToken, TokenSource};
use crate::config::FunnelConfig;
use crate::error::SessionError;

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Step-sequencing state machine for one quiz session.
///
/// Owns the session state, the selection buffer of the current step and at
/// most one pending timer. Every operation is a single in-memory transition:
/// it either applies fully and returns the resulting events, or does nothing
/// and returns no events. Operations that do not fit the current step kind
/// are silent no-ops.
///
/// The controller never sleeps. Timers are described by `pending_timer()`;
/// whoever runs the session (see `SessionHandle`) waits for the delay and
/// calls `fire` with the timer's token.
pub struct QuizController {
    id: SessionId,
    catalog: StepCatalog,
    config: FunnelConfig,
    state: SessionState,
    selection: SelectionBuffer,
    pending: Option<PendingTimer>,
    tokens: TokenSource,
}

impl QuizController {
    /// Start a session at the first step of `catalog`.
    ///
    /// If the first step is an analysis step its timer is armed right away.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Config` if the timing configuration is invalid.
    pub fn new(catalog: StepCatalog, config: FunnelConfig) -> Result<Self, SessionError> {
        config.validate()?;

        let mut controller = Self {
            id: SessionId::random(),
            catalog,
            config,
            state: SessionState::new(),
            selection: SelectionBuffer::new(),
            pending: None,
            tokens: TokenSource::default(),
        };
        // Nobody is subscribed yet; the first snapshot carries the same state.
        let _ = controller.enter_current_step();
        debug!(
            session = %controller.id,
            steps = controller.catalog.len(),
            "quiz session started"
        );
        Ok(controller)
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn catalog(&self) -> &StepCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &FunnelConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionBuffer {
        &self.selection
    }

    #[must_use]
    pub fn pending_timer(&self) -> Option<PendingTimer> {
        self.pending
    }

    #[must_use]
    pub fn current_step(&self) -> &StepDefinition {
        &self.catalog.steps()[self.state.current_step_index()]
    }

    #[must_use]
    pub fn is_at_last_step(&self) -> bool {
        self.state.current_step_index() == self.catalog.last_index()
    }

    #[must_use]
    pub fn progress(&self) -> StepProgress {
        StepProgress {
            index: self.state.current_step_index(),
            total: self.catalog.len(),
        }
    }

    /// True once the terminal pre-revelation step is on screen.
    #[must_use]
    pub fn checkout_available(&self) -> bool {
        self.is_at_last_step() && self.current_step().kind() == StepKind::PreRevelation
    }

    /// Whether an explicit `advance` would currently move the session.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        if self.is_at_last_step() || self.auto_advance_pending() {
            return false;
        }
        match self.current_step().kind() {
            StepKind::Intro | StepKind::Transition => true,
            StepKind::Question => !self.selection.is_empty(),
            StepKind::DateInput => !self.state.birth_date().is_empty(),
            StepKind::LoadingAnalysis | StepKind::PreRevelation => false,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let step = self.current_step();
        SessionSnapshot {
            state: self.state.clone(),
            step_id: step.id(),
            kind: step.kind(),
            selection: self.selection.ids().to_vec(),
            progress: self.progress(),
            can_advance: self.can_advance(),
            auto_advance_pending: self.auto_advance_pending(),
            checkout_available: self.checkout_available(),
        }
    }

    // ─── Operations ────────────────────────────────────────────────────────────

    /// Choose or toggle an option on the current question step.
    ///
    /// Single-select steps record the choice and arm the auto-advance timer;
    /// further choices are ignored until it fires. Multi-select steps toggle
    /// membership, rejecting additions beyond the cap.
    pub fn select_option(&mut self, option_id: &OptionId) -> Vec<SessionEvent> {
        let step = self.current_step();
        if step.kind() != StepKind::Question || !step.has_option(option_id) {
            trace!(session = %self.id, option = %option_id, "select_option ignored");
            return Vec::new();
        }
        let step_id = step.id();

        match step.selection_mode() {
            SelectionMode::Single => {
                if self.is_at_last_step() {
                    trace!(session = %self.id, "single select on last step ignored");
                    return Vec::new();
                }
                if self.auto_advance_pending() {
                    trace!(session = %self.id, "auto-advance already pending");
                    return Vec::new();
                }
                self.selection.choose_only(option_id.clone());
                let delay = self.config.select_delay();
                self.arm(TimerPurpose::AutoAdvance, delay);
            }
            SelectionMode::Multiple { max } => {
                let cap = if self.config.enforce_selection_cap() {
                    max
                } else {
                    None
                };
                if self.selection.toggle(option_id.clone(), cap) == Toggle::Capped {
                    trace!(session = %self.id, option = %option_id, "selection cap reached");
                    return Vec::new();
                }
            }
        }

        vec![SessionEvent::SelectionChanged {
            step_id,
            selected: self.selection.len(),
        }]
    }

    /// Store the raw birth-date value on a date-input step.
    pub fn set_birth_date(&mut self, value: impl Into<String>) -> Vec<SessionEvent> {
        if self.current_step().kind() != StepKind::DateInput {
            trace!(session = %self.id, "set_birth_date ignored");
            return Vec::new();
        }
        self.state.set_birth_date(BirthDate::new(value));
        vec![SessionEvent::BirthDateChanged]
    }

    /// Move to the next step if the current step's gate holds.
    pub fn advance(&mut self) -> Vec<SessionEvent> {
        if !self.can_advance() {
            trace!(
                session = %self.id,
                index = self.state.current_step_index(),
                kind = self.current_step().kind().as_str(),
                "advance gated"
            );
            return Vec::new();
        }
        self.commit_selection();
        self.move_forward()
    }

    /// Run the timer identified by `token`.
    ///
    /// Stale tokens (cancelled or already fired timers) are ignored.
    pub fn fire(&mut self, token: TimerToken) -> Vec<SessionEvent> {
        let Some(timer) = self.pending.filter(|pending| pending.token == token) else {
            trace!(session = %self.id, token = token.value(), "stale timer ignored");
            return Vec::new();
        };
        self.pending = None;
        debug!(
            session = %self.id,
            purpose = ?timer.purpose,
            index = timer.step_index,
            "timer fired"
        );

        match timer.purpose {
            TimerPurpose::AutoAdvance => {
                if self.is_at_last_step() || self.selection.is_empty() {
                    return Vec::new();
                }
                self.commit_selection();
                self.move_forward()
            }
            TimerPurpose::Analysis => {
                let mut events = Vec::new();
                if self.state.is_loading() {
                    self.state.set_loading(false);
                    events.push(SessionEvent::LoadingChanged(false));
                }
                if !self.is_at_last_step() {
                    events.extend(self.move_forward());
                }
                events
            }
        }
    }

    /// Cancel anything pending. Called when the session is discarded.
    pub fn teardown(&mut self) -> Option<PendingTimer> {
        let cancelled = self.pending.take();
        self.state.set_loading(false);
        if let Some(timer) = cancelled {
            debug!(session = %self.id, purpose = ?timer.purpose, "pending timer cancelled");
        }
        cancelled
    }

    // ─── Internals ─────────────────────────────────────────────────────────────

    fn auto_advance_pending(&self) -> bool {
        self.pending
            .is_some_and(|timer| timer.purpose == TimerPurpose::AutoAdvance)
    }

    fn arm(&mut self, purpose: TimerPurpose, delay: std::time::Duration) {
        let timer = PendingTimer {
            token: self.tokens.issue(),
            purpose,
            step_index: self.state.current_step_index(),
            delay,
        };
        debug!(session = %self.id, ?purpose, ?delay, index = timer.step_index, "timer armed");
        self.pending = Some(timer);
    }

    fn commit_selection(&mut self) {
        let step = self.current_step();
        if step.kind() != StepKind::Question {
            return;
        }
        let step_id = step.id();
        if let Some(answer) = self.selection.to_answer(step.allows_multiple()) {
            self.state.answers_mut().record(step_id, answer);
        }
    }

    fn move_forward(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.is_at_last_step() {
            return events;
        }

        if let Some(timer) = self.pending.take() {
            debug!(session = %self.id, purpose = ?timer.purpose, "timer cancelled on step change");
        }
        if self.state.is_loading() {
            self.state.set_loading(false);
            events.push(SessionEvent::LoadingChanged(false));
        }
        self.selection.clear();
        self.state.step_forward();
        events.extend(self.enter_current_step());
        events
    }

    fn enter_current_step(&mut self) -> Vec<SessionEvent> {
        let index = self.state.current_step_index();
        let step = self.current_step();
        let (step_id, kind) = (step.id(), step.kind());
        debug!(session = %self.id, index, step = %step_id, kind = kind.as_str(), "step entered");

        let mut events = vec![SessionEvent::StepEntered {
            index,
            step_id,
            kind,
        }];
        if kind == StepKind::LoadingAnalysis {
            let duration = self.config.analysis_duration();
            self.arm(TimerPurpose::Analysis, duration);
            self.state.set_loading(true);
            events.push(SessionEvent::LoadingChanged(true));
        }
        if self.checkout_available() {
            events.push(SessionEvent::Completed);
        }
        events
    }
}

impl fmt::Debug for QuizController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizController")
            .field("id", &self.id)
            .field("steps_len", &self.catalog.len())
            .field("current", &self.state.current_step_index())
            .field("answers_len", &self.state.answers().len())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
