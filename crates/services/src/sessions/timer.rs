use std::time::Duration;

/// Identifies one scheduled timer. A fresh token is issued every time a
/// timer is armed, so a late fire for a replaced timer can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// What a pending timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPurpose {
    /// Commit a single-select choice and move on.
    AutoAdvance,
    /// End the simulated analysis and move on.
    Analysis,
}

/// One-shot timer owned by the step at `step_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub token: TimerToken,
    pub purpose: TimerPurpose,
    pub step_index: usize,
    pub delay: Duration,
}

/// Hands out monotonically increasing timer tokens.
#[derive(Debug, Default, Clone)]
pub(crate) struct TokenSource {
    next: u64,
}

impl TokenSource {
    pub(crate) fn issue(&mut self) -> TimerToken {
        self.next += 1;
        TimerToken(self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_and_increasing() {
        let mut source = TokenSource::default();
        let first = source.issue();
        let second = source.issue();
        assert!(second > first);
        assert_eq!(first.value(), 1);
    }
}
