//! Named timers owned by the session.
//!
//! Replaces ad-hoc interval/timeout handles: every timer lives in one small
//! table, keyed by name, polled from the frame callback, and cancelled
//! explicitly on phase exit. A cancelled timer can never fire into a later
//! run.

use arrayvec::ArrayVec;
use tracing::debug;

/// Every timer the session can run. At most one of each exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerName {
    /// Adds an obstacle every spawn interval while running
    ObstacleSpawn,
    /// Advances the countdown script
    Countdown,
    /// Returns to the menu after the results screen
    GameOverDisplay,
}

impl TimerName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerName::ObstacleSpawn => "obstacle_spawn",
            TimerName::Countdown => "countdown",
            TimerName::GameOverDisplay => "game_over_display",
        }
    }
}

const TIMER_SLOTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Timer {
    name: TimerName,
    period_ms: f64,
    due_ms: f64,
    repeat: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TimerTable {
    timers: ArrayVec<Timer, TIMER_SLOTS>,
}

impl TimerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire once, `delay_ms` after `now_ms`. Replaces a timer of the same name.
    pub fn start_once(&mut self, name: TimerName, delay_ms: f64, now_ms: f64) {
        self.insert(Timer {
            name,
            period_ms: delay_ms,
            due_ms: now_ms + delay_ms,
            repeat: false,
        });
    }

    /// Fire every `period_ms`, first at `now_ms + period_ms`. Replaces a timer
    /// of the same name.
    pub fn start_interval(&mut self, name: TimerName, period_ms: f64, now_ms: f64) {
        self.insert(Timer {
            name,
            period_ms,
            due_ms: now_ms + period_ms,
            repeat: true,
        });
    }

    fn insert(&mut self, timer: Timer) {
        self.cancel(timer.name);
        // One slot per name, so this never overflows.
        self.timers.push(timer);
    }

    /// Returns true if a timer was running under that name.
    pub fn cancel(&mut self, name: TimerName) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.name != name);
        before != self.timers.len()
    }

    pub fn cancel_all(&mut self) {
        if !self.timers.is_empty() {
            debug!(count = self.timers.len(), "timers cancelled");
        }
        self.timers.clear();
    }

    pub fn is_active(&self, name: TimerName) -> bool {
        self.timers.iter().any(|t| t.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Collect the timers due at `now_ms`.
    ///
    /// One-shot timers are removed once fired. An interval fires at most once
    /// per poll; if it fell more than a period behind (a stalled host), it is
    /// rescheduled from `now_ms` instead of replaying the missed ticks.
    pub fn poll(&mut self, now_ms: f64) -> ArrayVec<TimerName, TIMER_SLOTS> {
        let mut fired = ArrayVec::new();
        self.timers.retain(|t| {
            if now_ms < t.due_ms {
                return true;
            }
            fired.push(t.name);
            if !t.repeat {
                return false;
            }
            t.due_ms += t.period_ms;
            if t.due_ms <= now_ms {
                t.due_ms = now_ms + t.period_ms;
            }
            true
        });
        fired
    }
}
