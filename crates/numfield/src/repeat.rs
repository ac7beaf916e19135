//! Press-and-hold auto-repeat for stepper buttons.
//!
//! [`AutoRepeat`] turns a held press into a stream of step counts. Like
//! the timer layer it is deadline-driven: the host supplies `Instant`s and
//! calls [`AutoRepeat::poll`] when its own scheduling wakes up, so the
//! controller works identically under a real event loop and in tests.
//!
//! A mouse press fires one immediate step, waits out the initial delay,
//! then ticks at the configured interval. A touch press additionally
//! holds a confirmation window first: if the finger travels beyond the
//! slop radius before the window closes, the gesture is a drag or scroll
//! rather than a hold, and the repeat is cancelled.

use std::time::{Duration, Instant};

use numfield_core::logging::targets;
use numfield_core::{TimerId, TimerManager};

/// Timing parameters for auto-repeat.
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatConfig {
    /// Delay between the initial step and the first repeat.
    pub initial_delay: Duration,
    /// Interval between repeats.
    pub interval: Duration,
    /// How long a touch must stay put before repeating starts.
    pub touch_confirm_delay: Duration,
    /// Movement radius (in pixels) a touch may drift during confirmation.
    pub touch_slop: f64,
    /// Per-tick speed-up factor. Each tick divides the interval by this;
    /// `1.0` keeps a constant rate.
    pub acceleration_multiplier: f64,
    /// Lower bound the interval never shrinks past.
    pub min_interval: Duration,
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(300),
            interval: Duration::from_millis(60),
            touch_confirm_delay: Duration::from_millis(500),
            touch_slop: 10.0,
            acceleration_multiplier: 1.0,
            min_interval: Duration::from_millis(20),
        }
    }
}

/// Where the controller is in the press lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    /// Touch press waiting for the confirmation window to close.
    Confirming { travel: f64 },
    /// Initial delay before the first repeat.
    Delay,
    /// Repeating at `interval`.
    Ticking { interval: Duration },
}

/// Converts a held press into repeated steps.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
/// use numfield::{AutoRepeat, RepeatConfig};
///
/// let mut repeat = AutoRepeat::new(RepeatConfig::default());
/// let t0 = Instant::now();
///
/// assert_eq!(repeat.press(1, t0, false), 1);
/// assert_eq!(repeat.poll(t0 + Duration::from_millis(100)), 0);
/// assert_eq!(repeat.poll(t0 + Duration::from_millis(310)), 1);
/// repeat.release();
/// ```
pub struct AutoRepeat {
    config: RepeatConfig,
    timers: TimerManager,
    phase: Phase,
    direction: i32,
    timer: Option<TimerId>,
    /// The logical deadline of the pending timer. Re-arming measures from
    /// here rather than the poll time, so late polls do not drift the
    /// tick cadence.
    deadline: Option<Instant>,
}

impl AutoRepeat {
    /// Create a controller with the given timing parameters.
    pub fn new(config: RepeatConfig) -> Self {
        Self {
            config,
            timers: TimerManager::new(),
            phase: Phase::Idle,
            direction: 0,
            timer: None,
            deadline: None,
        }
    }

    /// Begin a press in the given direction (positive = increment).
    ///
    /// Any previous session is cancelled first. Returns the immediate
    /// step (`direction.signum()`), which the caller applies right away.
    pub fn press(&mut self, direction: i32, now: Instant, is_touch: bool) -> i32 {
        self.cancel();

        self.direction = direction.signum();
        if self.direction == 0 {
            return 0;
        }

        if is_touch {
            self.phase = Phase::Confirming { travel: 0.0 };
            self.arm(now, self.config.touch_confirm_delay);
        } else {
            self.phase = Phase::Delay;
            self.arm(now, self.config.initial_delay);
        }

        tracing::trace!(
            target: targets::FIELD,
            direction = self.direction,
            touch = is_touch,
            "repeat press"
        );
        self.direction
    }

    /// Report pointer movement during the press.
    ///
    /// Only meaningful while a touch press is confirming: travel beyond
    /// the slop radius cancels the session.
    pub fn pointer_moved(&mut self, dx: f64, dy: f64) {
        if let Phase::Confirming { travel } = self.phase {
            let travel = travel + (dx * dx + dy * dy).sqrt();
            if travel > self.config.touch_slop {
                tracing::trace!(target: targets::FIELD, travel, "touch moved, repeat cancelled");
                self.cancel();
            } else {
                self.phase = Phase::Confirming { travel };
            }
        }
    }

    /// Collect the signed steps due by `now`.
    ///
    /// Returns 0 while the confirmation or delay window is open. Once
    /// ticking, a poll that arrives late returns every tick that elapsed
    /// in the meantime.
    pub fn poll(&mut self, now: Instant) -> i64 {
        let mut steps: i64 = 0;

        loop {
            let fired = self.timers.process_expired(now);
            if fired.is_empty() {
                break;
            }
            for id in fired {
                if self.timer != Some(id) {
                    continue;
                }
                let deadline = self.deadline.unwrap_or(now);
                match self.phase {
                    Phase::Confirming { .. } => {
                        self.phase = Phase::Delay;
                        self.arm(deadline, self.config.initial_delay);
                    }
                    Phase::Delay => {
                        steps += 1;
                        let interval = self.config.interval;
                        self.phase = Phase::Ticking { interval };
                        self.arm(deadline, interval);
                    }
                    Phase::Ticking { interval } => {
                        steps += 1;
                        let next = self.next_interval(interval);
                        self.phase = Phase::Ticking { interval: next };
                        self.arm(deadline, next);
                    }
                    Phase::Idle => {}
                }
            }
        }

        steps * i64::from(self.direction)
    }

    /// The time from `now` until the controller next needs a poll.
    pub fn time_until_next(&mut self, now: Instant) -> Option<Duration> {
        self.timers.time_until_next(now)
    }

    /// End the press. Idempotent.
    pub fn release(&mut self) {
        self.cancel();
    }

    /// Whether a press session is in progress.
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    fn cancel(&mut self) {
        if let Some(id) = self.timer.take() {
            let _ = self.timers.stop(id);
        }
        self.deadline = None;
        self.phase = Phase::Idle;
        self.direction = 0;
    }

    /// Arm the session timer `duration` after `from` (a logical deadline,
    /// not necessarily the current time).
    fn arm(&mut self, from: Instant, duration: Duration) {
        self.timer = Some(self.timers.start_one_shot(from, duration));
        self.deadline = Some(from + duration);
    }

    fn next_interval(&self, interval: Duration) -> Duration {
        if self.config.acceleration_multiplier <= 1.0 {
            return interval;
        }
        interval
            .div_f64(self.config.acceleration_multiplier)
            .max(self.config.min_interval)
    }
}
