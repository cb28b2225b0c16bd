use chrono::NaiveDate;
use serde::Serialize;

use crate::model::answer::AnswerMap;

/// Date format produced by the birth-date input.
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

//
// ─── BIRTH DATE ───────────────────────────────────────────────────────────────
//

/// Raw birth-date value as entered by the user.
///
/// Stored verbatim. Format checks belong to the input collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BirthDate(String);

impl BirthDate {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses the stored value as an ISO calendar date, if it is one.
    #[must_use]
    pub fn as_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.0.trim(), BIRTH_DATE_FORMAT).ok()
    }
}

//
// ─── SESSION STATE ────────────────────────────────────────────────────────────
//

/// Aggregate state of one quiz session.
///
/// Only the session controller mutates this; everyone else reads snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    current_step_index: usize,
    answers: AnswerMap,
    birth_date: BirthDate,
    loading: bool,
}

impl SessionState {
    /// Fresh state at the first step with nothing recorded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    #[must_use]
    pub fn birth_date(&self) -> &BirthDate {
        &self.birth_date
    }

    /// True only while the analysis timer is pending.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn answers_mut(&mut self) -> &mut AnswerMap {
        &mut self.answers
    }

    pub fn set_birth_date(&mut self, value: BirthDate) {
        self.birth_date = value;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Moves to the next index. Callers enforce the upper bound.
    pub fn step_forward(&mut self) {
        self.current_step_index += 1;
    }
}

//
// ─── PROGRESS ─────────────────────────────────────────────────────────────────
//

/// Position of the session within its catalog, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepProgress {
    pub index: usize,
    pub total: usize,
}

impl StepProgress {
    /// `(index + 1) / total`, in `(0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        (self.index + 1) as f64 / self.total as f64
    }

    /// Fraction scaled to a 0..=100 percentage.
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }
}
