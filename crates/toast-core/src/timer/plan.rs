//! Session configuration and the pre-start focus form.

use serde::{Deserialize, Serialize};

use crate::error::TimerError;

/// Configuration for one focus session.
///
/// Built once before `start` and immutable during the run. A zero
/// duration is representable but never runnable; `start` rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Countdown length in seconds.
    pub duration_secs: u64,
    /// What the user wants to focus on. May be empty; the UI falls back
    /// to a generic title then.
    pub focus_label: String,
}

impl TimerConfig {
    /// Create a validated config.
    pub fn new(duration_secs: u64, focus_label: impl Into<String>) -> Result<Self, TimerError> {
        if duration_secs == 0 {
            return Err(TimerError::InvalidConfig { duration_secs });
        }
        Ok(Self {
            duration_secs,
            focus_label: focus_label.into(),
        })
    }
}

/// Focus metadata collected before a session starts.
///
/// Mirrors the set-time form: hour and minute pickers plus a free-text
/// focus field (seconds exist for short sessions driven from the CLI).
/// The plan holds whatever the user typed; validation happens when the
/// plan is confirmed into a [`TimerConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusPlan {
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub seconds: u32,
    #[serde(default)]
    pub focus: String,
}

impl FocusPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total configured duration in seconds.
    pub fn duration_secs(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    /// Consume the plan into a validated config.
    ///
    /// Fails with `InvalidConfig` when the total duration is zero.
    pub fn confirm(self) -> Result<TimerConfig, TimerError> {
        TimerConfig::new(self.duration_secs(), self.focus)
    }
}
