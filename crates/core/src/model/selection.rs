use serde::Serialize;

use crate::model::answer::Answer;
use crate::model::ids::OptionId;

/// Result of toggling an option in a multi-select buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    /// The buffer is full and the option was not already selected.
    Capped,
}

/// In-progress choices for the step currently on screen.
///
/// Ordered by selection time, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionBuffer {
    ids: Vec<OptionId>,
}

impl SelectionBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the buffer with a single choice.
    pub fn choose_only(&mut self, id: OptionId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Adds `id` if absent, removes it if present.
    ///
    /// With a `cap`, adding to a full buffer is rejected rather than
    /// replacing an earlier choice.
    pub fn toggle(&mut self, id: OptionId, cap: Option<usize>) -> Toggle {
        if let Some(pos) = self.ids.iter().position(|selected| *selected == id) {
            self.ids.remove(pos);
            return Toggle::Removed;
        }
        if cap.is_some_and(|cap| self.ids.len() >= cap) {
            return Toggle::Capped;
        }
        self.ids.push(id);
        Toggle::Added
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn contains(&self, id: &OptionId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn ids(&self) -> &[OptionId] {
        &self.ids
    }

    /// Converts the buffer into a committed answer.
    ///
    /// Returns `None` when nothing is selected.
    #[must_use]
    pub fn to_answer(&self, multiple: bool) -> Option<Answer> {
        if multiple {
            (!self.ids.is_empty()).then(|| Answer::Multiple(self.ids.clone()))
        } else {
            self.ids.first().cloned().map(Answer::Single)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> OptionId {
        OptionId::new(raw).unwrap()
    }

    #[test]
    fn cap_rejects_third_choice() {
        let mut buffer = SelectionBuffer::new();
        assert_eq!(buffer.toggle(id("money"), Some(2)), Toggle::Added);
        assert_eq!(buffer.toggle(id("love"), Some(2)), Toggle::Added);
        assert_eq!(buffer.toggle(id("peace"), Some(2)), Toggle::Capped);
        assert_eq!(buffer.ids(), &[id("money"), id("love")]);
    }

    #[test]
    fn removing_frees_a_slot() {
        let mut buffer = SelectionBuffer::new();
        buffer.toggle(id("money"), Some(2));
        buffer.toggle(id("love"), Some(2));
        assert_eq!(buffer.toggle(id("money"), Some(2)), Toggle::Removed);
        assert_eq!(buffer.toggle(id("peace"), Some(2)), Toggle::Added);
        assert_eq!(buffer.ids(), &[id("love"), id("peace")]);
    }

    #[test]
    fn uncapped_toggle_accepts_everything() {
        let mut buffer = SelectionBuffer::new();
        for raw in ["a", "b", "c", "d"] {
            assert_eq!(buffer.toggle(id(raw), None), Toggle::Added);
        }
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn to_answer_respects_mode() {
        let mut buffer = SelectionBuffer::new();
        assert_eq!(buffer.to_answer(false), None);
        assert_eq!(buffer.to_answer(true), None);

        buffer.choose_only(id("flows"));
        assert_eq!(buffer.to_answer(false), Some(Answer::Single(id("flows"))));
        assert_eq!(buffer.to_answer(true), Some(Answer::Multiple(vec![id("flows")])));
    }
}
