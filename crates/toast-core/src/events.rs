use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::outcome::SessionOutcome;
use crate::timer::TimerState;

/// Every transition of the focus timer produces an Event.
/// The presentation layer renders them; nothing else consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        focus_label: String,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero; outcome is always `completed`.
    SessionCompleted {
        focus_label: String,
        outcome: SessionOutcome,
        at: DateTime<Utc>,
    },
    /// The user stopped early; remaining time is frozen where it stood.
    SessionAborted {
        outcome: SessionOutcome,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        remaining_secs: u64,
        total_secs: u64,
        focus_label: String,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}
