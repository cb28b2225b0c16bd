use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::ids::{OptionId, StepId};

/// Committed answer for one question step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(OptionId),
    Multiple(Vec<OptionId>),
}

/// Answers recorded so far, keyed by step id.
///
/// Entries are written once, when the owning step is completed, and never
/// overwritten afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerMap {
    entries: BTreeMap<StepId, Answer>,
}

impl AnswerMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the answer for `step`.
    ///
    /// Returns false and leaves the map untouched if the step already has an answer.
    pub fn record(&mut self, step: StepId, answer: Answer) -> bool {
        if self.entries.contains_key(&step) {
            return false;
        }
        self.entries.insert(step, answer);
        true
    }

    #[must_use]
    pub fn get(&self, step: StepId) -> Option<&Answer> {
        self.entries.get(&step)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> OptionId {
        OptionId::new(raw).unwrap()
    }

    #[test]
    fn record_is_write_once() {
        let mut answers = AnswerMap::new();
        assert!(answers.record(StepId::new(2), Answer::Single(id("circles"))));
        assert!(!answers.record(StepId::new(2), Answer::Single(id("flows"))));
        assert_eq!(answers.get(StepId::new(2)), Some(&Answer::Single(id("circles"))));
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn answers_serialize_like_the_catalog_contract() {
        let mut answers = AnswerMap::new();
        answers.record(StepId::new(2), Answer::Single(id("circles")));
        answers.record(StepId::new(3), Answer::Multiple(vec![id("money"), id("love")]));

        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(
            json,
            r#"{"entries":{"2":"circles","3":["money","love"]}}"#
        );
    }
}
