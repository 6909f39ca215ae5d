//! Session outcome notification.
//!
//! The presentation layer renders one of two overlays when a session ends:
//! the celebration for a finished countdown, or the burned toast for a
//! user abort. [`SessionOutcome`] is a pure function of the terminal state;
//! [`OutcomeNotifier`] guarantees it fires exactly once per session.

use serde::{Deserialize, Serialize};

use crate::error::TimerError;
use crate::timer::TimerState;

/// Terminal verdict of one focus session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionOutcome {
    /// The countdown reached zero.
    Completed,
    /// The user stopped the session early.
    Aborted,
}

impl SessionOutcome {
    /// Map a terminal state to its outcome. `None` for non-terminal states.
    pub fn from_terminal(state: TimerState) -> Option<Self> {
        match state {
            TimerState::Finished => Some(SessionOutcome::Completed),
            TimerState::Aborted => Some(SessionOutcome::Aborted),
            _ => None,
        }
    }
}

/// One-shot latch around [`SessionOutcome::from_terminal`].
///
/// A session produces exactly one outcome. Notifying twice before a
/// `reset`, or notifying from a non-terminal state, is a programming
/// error and is reported rather than swallowed.
#[derive(Debug, Default)]
pub struct OutcomeNotifier {
    fired: Option<SessionOutcome>,
}

impl OutcomeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the outcome for the given terminal state.
    pub fn notify(&mut self, state: TimerState) -> Result<SessionOutcome, TimerError> {
        if self.fired.is_some() {
            return Err(TimerError::InvalidTransition {
                op: "notify outcome twice",
                from: state,
            });
        }
        let outcome = SessionOutcome::from_terminal(state).ok_or(
            TimerError::InvalidTransition {
                op: "notify outcome",
                from: state,
            },
        )?;
        self.fired = Some(outcome);
        Ok(outcome)
    }

    /// The outcome fired for the current session, if any.
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.fired
    }

    /// Clear the latch for the next session.
    pub fn reset(&mut self) {
        self.fired = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finished_maps_to_completed() {
        assert_eq!(
            SessionOutcome::from_terminal(TimerState::Finished),
            Some(SessionOutcome::Completed)
        );
        assert_eq!(
            SessionOutcome::from_terminal(TimerState::Aborted),
            Some(SessionOutcome::Aborted)
        );
        assert_eq!(SessionOutcome::from_terminal(TimerState::Running), None);
    }

    #[test]
    fn notify_fires_once() {
        let mut notifier = OutcomeNotifier::new();
        assert_eq!(
            notifier.notify(TimerState::Finished),
            Ok(SessionOutcome::Completed)
        );
        assert!(notifier.notify(TimerState::Finished).is_err());
        assert_eq!(notifier.outcome(), Some(SessionOutcome::Completed));
    }

    #[test]
    fn notify_rejects_non_terminal_state() {
        let mut notifier = OutcomeNotifier::new();
        assert!(matches!(
            notifier.notify(TimerState::Paused),
            Err(TimerError::InvalidTransition { .. })
        ));
        assert_eq!(notifier.outcome(), None);
    }

    #[test]
    fn reset_rearms_the_latch() {
        let mut notifier = OutcomeNotifier::new();
        notifier.notify(TimerState::Aborted).unwrap();
        notifier.reset();
        assert_eq!(notifier.outcome(), None);
        assert_eq!(
            notifier.notify(TimerState::Finished),
            Ok(SessionOutcome::Completed)
        );
    }
}
