use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::model::ids::{OptionId, StepId};
use crate::model::step::{StepDefinition, StepKind};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("step catalog cannot be empty")]
    Empty,

    #[error("duplicate step id {0}")]
    DuplicateStepId(StepId),

    #[error("question step {0} has no options")]
    QuestionWithoutOptions(StepId),

    #[error("step {step} has a blank option id")]
    BlankOptionId { step: StepId },

    #[error("step {step} repeats option id {option}")]
    DuplicateOptionId { step: StepId, option: OptionId },

    #[error("step {0} declares maxSelections without allowing multiple choices, or a cap of 0")]
    InvalidMaxSelections(StepId),

    #[error("step index {index} out of range for catalog of {len} steps")]
    IndexOutOfRange { index: usize, len: usize },
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Immutable, ordered list of steps for one funnel.
///
/// Cheap to clone; all clones share the same step list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCatalog {
    steps: Arc<[StepDefinition]>,
}

impl StepCatalog {
    /// Builds a catalog after checking its structural invariants.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` for an empty list, `DuplicateStepId` when
    /// two steps share an id, `QuestionWithoutOptions` for a question step with
    /// no options, `BlankOptionId`/`DuplicateOptionId` for bad option ids and
    /// `InvalidMaxSelections` for a cap on a single-select step or a zero cap.
    pub fn new(steps: Vec<StepDefinition>) -> Result<Self, CatalogError> {
        if steps.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(steps.len());
        for step in &steps {
            if !seen.insert(step.id()) {
                return Err(CatalogError::DuplicateStepId(step.id()));
            }
            validate_options(step)?;
        }

        Ok(Self {
            steps: steps.into(),
        })
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// Step at `index`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::IndexOutOfRange` if `index >= len()`.
    pub fn step_at(&self, index: usize) -> Result<&StepDefinition, CatalogError> {
        self.steps.get(index).ok_or(CatalogError::IndexOutOfRange {
            index,
            len: self.steps.len(),
        })
    }

    #[must_use]
    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    /// Count of steps with the given kind.
    #[must_use]
    pub fn count_kind(&self, kind: StepKind) -> usize {
        self.steps.iter().filter(|step| step.kind() == kind).count()
    }
}

fn validate_options(step: &StepDefinition) -> Result<(), CatalogError> {
    if step.kind() == StepKind::Question && step.options().is_empty() {
        return Err(CatalogError::QuestionWithoutOptions(step.id()));
    }

    let mut seen = HashSet::with_capacity(step.options().len());
    for option in step.options() {
        if option.id().as_str().trim().is_empty() {
            return Err(CatalogError::BlankOptionId { step: step.id() });
        }
        if !seen.insert(option.id()) {
            return Err(CatalogError::DuplicateOptionId {
                step: step.id(),
                option: option.id().clone(),
            });
        }
    }

    match step.max_selections() {
        Some(0) => Err(CatalogError::InvalidMaxSelections(step.id())),
        Some(_) if !step.allows_multiple() => Err(CatalogError::InvalidMaxSelections(step.id())),
        _ => Ok(()),
    }
}
