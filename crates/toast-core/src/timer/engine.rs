//! Focus timer state machine.
//!
//! The engine owns no timer of its own. On `start` it subscribes to a
//! [`Clock`] and the pump delivers ticks by calling `handle_tick`; pause,
//! abort and completion unsubscribe again. All transitions are synchronous
//! and atomic -- an operation either moves the machine to its target state
//! or returns an error and changes nothing.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Running -> (Paused <-> Running)
//!                 -> Finished -\
//!                 -> Aborted ---+-> reset -> Idle
//! ```
//!
//! `Finished` and `Aborted` are terminal until an explicit `reset`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::plan::TimerConfig;
use crate::clock::{Clock, SubscriberId};
use crate::error::TimerError;
use crate::events::Event;
use crate::outcome::{OutcomeNotifier, SessionOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Finished,
    Aborted,
}

impl TimerState {
    /// True for `Finished` and `Aborted`, the only states `reset` accepts.
    pub fn is_terminal(self) -> bool {
        matches!(self, TimerState::Finished | TimerState::Aborted)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        TimerState::Idle
    }
}

/// Read-only view of the timer for rendering.
///
/// Derived on demand; mutating a snapshot has no effect on the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub remaining_secs: u64,
    pub state: TimerState,
}

/// Core focus timer.
///
/// Single-timeline by design: drive it from one pump at a time.
#[derive(Debug, Default)]
pub struct FocusTimer {
    state: TimerState,
    remaining_secs: u64,
    config: Option<TimerConfig>,
    subscription: Option<SubscriberId>,
    notifier: OutcomeNotifier,
}

impl FocusTimer {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// The active session's config, `None` while `Idle` or after `reset`.
    pub fn config(&self) -> Option<&TimerConfig> {
        self.config.as_ref()
    }

    pub fn focus_label(&self) -> &str {
        self.config.as_ref().map(|c| c.focus_label.as_str()).unwrap_or("")
    }

    /// The outcome fired for this session, once a terminal state is reached.
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.notifier.outcome()
    }

    /// Whether the engine currently holds a clock subscription.
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            remaining_secs: self.remaining_secs,
            state: self.state,
        }
    }

    /// 0.0 .. 1.0 progress through the configured duration.
    pub fn progress(&self) -> f64 {
        let total = self.config.as_ref().map(|c| c.duration_secs).unwrap_or(0);
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / total as f64)
    }

    /// Build a full state snapshot event.
    pub fn snapshot_event(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            remaining_secs: self.remaining_secs,
            total_secs: self.config.as_ref().map(|c| c.duration_secs).unwrap_or(0),
            focus_label: self.focus_label().to_string(),
            progress_pct: self.progress() * 100.0,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a session.
    ///
    /// No-op (`Ok(None)`) when already `Running`. Fails with
    /// `InvalidConfig` for a zero duration and with `InvalidTransition`
    /// from `Paused` or a terminal state.
    pub fn start(
        &mut self,
        config: TimerConfig,
        clock: &mut dyn Clock,
    ) -> Result<Option<Event>, TimerError> {
        match self.state {
            TimerState::Running => Ok(None),
            TimerState::Idle => {
                if config.duration_secs == 0 {
                    return Err(TimerError::InvalidConfig { duration_secs: 0 });
                }
                self.remaining_secs = config.duration_secs;
                let event = Event::SessionStarted {
                    focus_label: config.focus_label.clone(),
                    duration_secs: config.duration_secs,
                    at: Utc::now(),
                };
                self.config = Some(config);
                self.subscription = Some(clock.subscribe());
                self.state = TimerState::Running;
                Ok(Some(event))
            }
            from => Err(TimerError::InvalidTransition { op: "start", from }),
        }
    }

    /// Deliver one clock tick.
    ///
    /// Decrements while `Running`; the tick that exhausts the countdown
    /// moves the machine to `Finished`, drops the clock subscription and
    /// fires the `completed` outcome. Ticks in any other state are
    /// ignored (`Ok(None)`) -- an idle clock may keep ticking.
    pub fn handle_tick(&mut self, clock: &mut dyn Clock) -> Result<Option<Event>, TimerError> {
        if self.state != TimerState::Running {
            return Ok(None);
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return Ok(None);
        }
        self.drop_subscription(clock);
        self.state = TimerState::Finished;
        let outcome = self.notifier.notify(self.state)?;
        Ok(Some(Event::SessionCompleted {
            focus_label: self.focus_label().to_string(),
            outcome,
            at: Utc::now(),
        }))
    }

    /// Suspend the countdown, keeping the remaining time exactly as is.
    pub fn pause(&mut self, clock: &mut dyn Clock) -> Result<Event, TimerError> {
        if self.state != TimerState::Running {
            return Err(TimerError::InvalidTransition {
                op: "pause",
                from: self.state,
            });
        }
        self.drop_subscription(clock);
        self.state = TimerState::Paused;
        Ok(Event::SessionPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Continue a paused countdown from where it stood.
    pub fn resume(&mut self, clock: &mut dyn Clock) -> Result<Event, TimerError> {
        if self.state != TimerState::Paused {
            return Err(TimerError::InvalidTransition {
                op: "resume",
                from: self.state,
            });
        }
        self.subscription = Some(clock.subscribe());
        self.state = TimerState::Running;
        Ok(Event::SessionResumed {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop the session early.
    ///
    /// Legal from `Running` and `Paused`; a no-op (`Ok(None)`) anywhere
    /// else. The remaining time freezes where it stood and the `aborted`
    /// outcome fires.
    pub fn abort(&mut self, clock: &mut dyn Clock) -> Result<Option<Event>, TimerError> {
        match self.state {
            TimerState::Running | TimerState::Paused => {
                self.drop_subscription(clock);
                self.state = TimerState::Aborted;
                let outcome = self.notifier.notify(self.state)?;
                Ok(Some(Event::SessionAborted {
                    outcome,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                }))
            }
            _ => Ok(None),
        }
    }

    /// Discard the finished or aborted session and return to `Idle`.
    ///
    /// Remaining time, config and the outcome latch are all cleared; the
    /// caller supplies a fresh config for the next session.
    pub fn reset(&mut self) -> Result<Event, TimerError> {
        if !self.state.is_terminal() {
            return Err(TimerError::InvalidTransition {
                op: "reset",
                from: self.state,
            });
        }
        self.state = TimerState::Idle;
        self.remaining_secs = 0;
        self.config = None;
        self.notifier.reset();
        Ok(Event::SessionReset { at: Utc::now() })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn drop_subscription(&mut self, clock: &mut dyn Clock) {
        if let Some(id) = self.subscription.take() {
            clock.unsubscribe(id);
        }
    }
}
