//! Foreground focus sessions.
//!
//! `run` drives the engine on a real one-second clock. Stdin lines are the
//! controls (`p` pause, `r` resume, `q` abort); a reader thread forwards
//! them over a channel so the same pump can wait on the clock and on the
//! user at once. EOF just means no further commands are coming.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;

use clap::Subcommand;
use toast_core::{
    Config, Event, FocusPlan, FocusTimer, IntervalClock, TimerState,
};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a focus session in the foreground
    Run {
        /// Session length, hours part
        #[arg(long)]
        hours: Option<u32>,
        /// Session length, minutes part
        #[arg(long)]
        minutes: Option<u32>,
        /// Session length, seconds part (handy for short sessions)
        #[arg(long)]
        seconds: Option<u32>,
        /// What to focus on
        #[arg(long, default_value = "")]
        focus: String,
        /// Emit JSON events instead of the countdown display
        #[arg(long)]
        json: bool,
    },
    /// Validate a session plan and print it as JSON without running
    Plan {
        /// Session length, hours part
        #[arg(long)]
        hours: Option<u32>,
        /// Session length, minutes part
        #[arg(long)]
        minutes: Option<u32>,
        /// Session length, seconds part
        #[arg(long)]
        seconds: Option<u32>,
        /// What to focus on
        #[arg(long, default_value = "")]
        focus: String,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    match action {
        TimerAction::Plan {
            hours,
            minutes,
            seconds,
            focus,
        } => {
            let plan = build_plan(&config, hours, minutes, seconds, focus);
            let timer_config = plan.confirm()?;
            println!("{}", serde_json::to_string_pretty(&timer_config)?);
            Ok(())
        }
        TimerAction::Run {
            hours,
            minutes,
            seconds,
            focus,
            json,
        } => {
            let plan = build_plan(&config, hours, minutes, seconds, focus);
            let json = json || config.output.json_events;
            run_session(plan, json)
        }
    }
}

/// Fill in configured defaults: duration only when no time flag was given
/// at all, focus label only when the user typed nothing.
fn build_plan(
    config: &Config,
    hours: Option<u32>,
    minutes: Option<u32>,
    seconds: Option<u32>,
    focus: String,
) -> FocusPlan {
    let minutes = match (hours, minutes, seconds) {
        (None, None, None) => Some(config.timer.focus_minutes),
        _ => minutes,
    };
    let focus = if focus.is_empty() {
        config.timer.focus_label.clone()
    } else {
        focus
    };
    FocusPlan {
        hours: hours.unwrap_or(0),
        minutes: minutes.unwrap_or(0),
        seconds: seconds.unwrap_or(0),
        focus,
    }
}

fn run_session(plan: FocusPlan, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let timer_config = plan.confirm()?;
    let mut timer = FocusTimer::new();
    let mut clock = IntervalClock::per_second();
    let commands = spawn_stdin_reader();
    let mut stdin_open = true;

    if let Some(event) = timer.start(timer_config, &mut clock)? {
        emit(&event, json)?;
    }

    while !timer.state().is_terminal() {
        if timer.state() == TimerState::Paused {
            if !stdin_open {
                // Nobody left to resume; the toast burns.
                if let Some(event) = timer.abort(&mut clock)? {
                    emit(&event, json)?;
                }
                break;
            }
            match commands.recv() {
                Ok(line) => apply_command(&line, &mut timer, &mut clock, json)?,
                Err(_) => stdin_open = false,
            }
            continue;
        }

        // Running: wait for the earlier of a command or the next tick.
        let timeout = clock.until_next_tick();
        if stdin_open {
            match commands.recv_timeout(timeout) {
                Ok(line) => {
                    apply_command(&line, &mut timer, &mut clock, json)?;
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    stdin_open = false;
                    continue;
                }
                Err(RecvTimeoutError::Timeout) => {}
            }
        } else if !timeout.is_zero() {
            thread::sleep(timeout);
        }

        clock.advance();
        if let Some(event) = timer.handle_tick(&mut clock)? {
            emit(&event, json)?;
        } else if json {
            emit(&timer.snapshot_event(), json)?;
        } else {
            render_countdown(&timer)?;
        }
    }

    tracing::debug!(state = ?timer.state(), outcome = ?timer.outcome(), "session over");
    Ok(())
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn apply_command(
    line: &str,
    timer: &mut FocusTimer,
    clock: &mut IntervalClock,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match line.trim() {
        "p" | "pause" => {
            if timer.state() == TimerState::Running {
                let event = timer.pause(clock)?;
                emit(&event, json)?;
            }
        }
        "r" | "resume" => {
            if timer.state() == TimerState::Paused {
                let event = timer.resume(clock)?;
                clock.rearm();
                emit(&event, json)?;
            }
        }
        "q" | "quit" | "a" | "abort" | "stop" => {
            if let Some(event) = timer.abort(clock)? {
                emit(&event, json)?;
            }
        }
        "" => {}
        other => eprintln!("unknown command: {other} (p pause, r resume, q abort)"),
    }
    Ok(())
}

fn emit(event: &Event, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }
    match event {
        Event::SessionStarted {
            focus_label,
            duration_secs,
            ..
        } => {
            let title = if focus_label.is_empty() {
                "TOASTING"
            } else {
                focus_label.as_str()
            };
            println!("{title}");
            println!(
                "  {} on the clock (p pause, r resume, q abort)",
                fmt_clock(*duration_secs)
            );
        }
        Event::SessionPaused { remaining_secs, .. } => {
            println!("\npaused at {}", fmt_clock(*remaining_secs));
        }
        Event::SessionResumed { remaining_secs, .. } => {
            println!("resumed at {}", fmt_clock(*remaining_secs));
        }
        Event::SessionCompleted { .. } => {
            println!("\nWELL DONE! You made it 🎉");
        }
        Event::SessionAborted { remaining_secs, .. } => {
            println!(
                "\nYou burned the toast! {} was still on the clock",
                fmt_clock(*remaining_secs)
            );
        }
        Event::SessionReset { .. } | Event::StateSnapshot { .. } => {}
    }
    io::stdout().flush()?;
    Ok(())
}

fn render_countdown(timer: &FocusTimer) -> Result<(), Box<dyn std::error::Error>> {
    print!("\r  {}  ", fmt_clock(timer.remaining_secs()));
    io::stdout().flush()?;
    Ok(())
}

fn fmt_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
