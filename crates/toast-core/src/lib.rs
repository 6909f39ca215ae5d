//! # Toast Core Library
//!
//! Core logic for Toast, a Pomodoro-style focus timer built around the
//! metaphor of toasting a slice of bread. The library is UI-free: the CLI
//! binary and any future GUI are thin layers over the same engine.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven state machine. It owns no platform
//!   timer; it subscribes to a [`Clock`] and the caller pumps ticks into
//!   `handle_tick()`.
//! - **Clock Source**: explicit subscribe/unsubscribe tick emitters --
//!   a real one-second [`IntervalClock`] or a [`ManualClock`] for tests.
//! - **Outcome Notifier**: the once-per-session completed/aborted signal
//!   the presentation layer turns into the celebration or burned-toast
//!   overlay.
//! - **Catalog**: the plain task/course/note records the rest of the app
//!   exchanges with the UI, in memory only.
//!
//! ## Key Components
//!
//! - [`FocusTimer`]: core timer state machine
//! - [`FocusPlan`] / [`TimerConfig`]: focus metadata entered before a run
//! - [`OutcomeNotifier`]: terminal outcome latch
//! - [`Config`]: TOML preference management

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod outcome;
pub mod timer;

pub use catalog::{Catalog, Course, CourseColor, CourseDraft, Note, Task};
pub use clock::{Clock, IntervalClock, ManualClock, SubscriberId};
pub use config::Config;
pub use error::{ConfigError, CoreError, TimerError, ValidationError};
pub use events::Event;
pub use outcome::{OutcomeNotifier, SessionOutcome};
pub use timer::{FocusPlan, FocusTimer, TimerConfig, TimerSnapshot, TimerState};
