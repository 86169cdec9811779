//! Send and check screen state.

use std::time::Duration;

use chrono::{DateTime, Local};

/// How long the copy button reads "Copied!".
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

/// State for the send and check screen.
#[derive(Debug, Clone, Default)]
pub struct InboxesState {
    /// Recipient address as typed. Blank means the identify address.
    pub recipient: String,
    /// Whether a send is in flight.
    pub is_sending: bool,
    /// Whether a results check is in flight, manual or automatic.
    pub is_checking: bool,
    /// Wall-clock time of the last check attempt.
    pub last_checked: Option<DateTime<Local>>,
    /// Whether the copy button shows its confirmation.
    pub code_copied: bool,
    /// Bumped on every copy so only the latest timer clears the confirmation.
    pub copy_generation: u64,
}

impl InboxesState {
    /// Creates the state for a freshly created test.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the code as copied and returns the generation to expire later.
    pub fn mark_copied(&mut self) -> u64 {
        self.copy_generation = self.copy_generation.wrapping_add(1);
        self.code_copied = true;
        self.copy_generation
    }

    /// Clears the confirmation if `generation` is still the latest copy.
    pub fn expire_copied(&mut self, generation: u64) {
        if generation == self.copy_generation {
            self.code_copied = false;
        }
    }

    /// "Last checked" line, once a check has run.
    #[must_use]
    pub fn last_checked_label(&self) -> Option<String> {
        self.last_checked
            .map(|at| format!("Last checked: {}", at.format("%H:%M:%S")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_copy_expires_feedback() {
        let mut state = InboxesState::new();
        let first = state.mark_copied();
        let second = state.mark_copied();

        state.expire_copied(first);
        assert!(state.code_copied);

        state.expire_copied(second);
        assert!(!state.code_copied);
    }

    #[test]
    fn test_no_label_before_first_check() {
        assert!(InboxesState::new().last_checked_label().is_none());
    }
}
