mod engine;
mod plan;

pub use engine::{FocusTimer, TimerSnapshot, TimerState};
pub use plan::{FocusPlan, TimerConfig};
