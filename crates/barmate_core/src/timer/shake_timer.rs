//! Countdown timer used while shaking a drink.
//!
//! # Responsibility
//! - Count down once per tick from a per-recipe duration to zero.
//! - Expose start/stop/reset controls and a one-shot finish signal.
//!
//! # Invariants
//! - `remaining_secs <= initial_secs` at all times.
//! - `tick()` only changes state while running.
//! - `Finished` is emitted exactly once per completed run, after which the
//!   timer is back in `Ready` with `remaining_secs == initial_secs`.
//!
//! The timer holds no clock; callers drive `tick()` once per second.

use log::info;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Lifecycle phase of a [`ShakeTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// Not started since the last reset.
    Ready,
    /// Counting down.
    Running,
    /// Started at least once, currently stopped.
    Paused,
}

/// Notification produced by timer transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown reached zero.
    Finished,
}

/// Label for the primary start/stop control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerAction {
    Start,
    Stop,
    Resume,
}

impl TimerAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Stop => "Stop",
            Self::Resume => "Resume",
        }
    }
}

impl Display for TimerAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Serializable view of timer state for UI layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub initial_secs: u32,
    pub remaining_secs: u32,
    pub phase: TimerPhase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShakeTimer {
    initial_secs: u32,
    remaining_secs: u32,
    phase: TimerPhase,
}

impl Default for ShakeTimer {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ShakeTimer {
    pub fn new(initial_secs: u32) -> Self {
        Self {
            initial_secs,
            remaining_secs: initial_secs,
            phase: TimerPhase::Ready,
        }
    }

    /// Sets a new starting value and resets the countdown to it.
    pub fn initialize(&mut self, initial_secs: u32) {
        self.initial_secs = initial_secs;
        self.reset();
    }

    /// Starts or resumes counting down.
    ///
    /// Returns `Finished` right away when nothing is left to count.
    pub fn start(&mut self) -> Option<TimerEvent> {
        if self.phase == TimerPhase::Running {
            return None;
        }
        self.phase = TimerPhase::Running;
        if self.remaining_secs == 0 {
            return Some(self.finish());
        }
        None
    }

    /// Pauses a running countdown, keeping the remaining time.
    pub fn stop(&mut self) {
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Paused;
        }
    }

    pub fn reset(&mut self) {
        self.remaining_secs = self.initial_secs;
        self.phase = TimerPhase::Ready;
    }

    /// Advances one second.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return Some(self.finish());
        }
        None
    }

    /// Toggles between running and stopped, like the primary button.
    pub fn toggle(&mut self) -> Option<TimerEvent> {
        if self.is_running() {
            self.stop();
            None
        } else {
            self.start()
        }
    }

    pub fn initial_secs(&self) -> u32 {
        self.initial_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn has_started(&self) -> bool {
        self.phase != TimerPhase::Ready
    }

    pub fn action(&self) -> TimerAction {
        match self.phase {
            TimerPhase::Ready => TimerAction::Start,
            TimerPhase::Running => TimerAction::Stop,
            TimerPhase::Paused => TimerAction::Resume,
        }
    }

    /// Remaining time formatted as `MM:SS`.
    pub fn display(&self) -> String {
        format_mm_ss(self.remaining_secs)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            initial_secs: self.initial_secs,
            remaining_secs: self.remaining_secs,
            phase: self.phase,
        }
    }

    fn finish(&mut self) -> TimerEvent {
        info!(
            "event=timer_finished module=timer status=ok initial_secs={}",
            self.initial_secs
        );
        self.reset();
        TimerEvent::Finished
    }
}

/// Formats seconds as zero-padded `MM:SS`; minutes are not wrapped at 60.
pub fn format_mm_ss(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
