//! Gesture timing: the pacing table and the swipe interpolation planner.
//!
//! The KVM bridge forwards events to the phone as a USB mouse, and the phone's
//! pointer handling debounces input that arrives faster than a human could
//! produce it.  The delays below were tuned against real hardware; they are
//! configuration, not protocol constants, and should only be changed after
//! re-validating gestures on a device.
//!
//! # Swipe pacing (for beginners)
//!
//! A swipe is "press at A, drag to B, release".  If the pointer jumps straight
//! from A to B the phone sees a teleport, not a drag, so the planner inserts
//! intermediate moves along the straight line at about 60 updates per second.
//! Each intermediate point carries the *offset from the start of the drag* at
//! which it should have been sent.  The gesture engine sleeps until
//! `anchor + offset` after each move, so time spent inside HTTP calls is
//! absorbed instead of accumulating:
//!
//! ```text
//! anchor ──► move p1 ─ sleep until anchor+1/60 s ─► move p2 ─ sleep until anchor+2/60 s ─► …
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// All delays used by the gesture engine, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Pointer move -> first button event for double-tap and long-press.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    /// Gap between the two clicks of a double-tap.
    #[serde(default = "default_double_tap_gap_ms")]
    pub double_tap_gap_ms: u64,
    /// Start move -> button down, and end move -> button up, for swipes.
    #[serde(default = "default_swipe_edge_ms")]
    pub swipe_edge_ms: u64,
    /// Trailing wait after every gesture except tap and text entry.
    #[serde(default = "default_after_gesture_ms")]
    pub after_gesture_ms: u64,
    /// Gap between the two relay-pull shortcuts of an app launch.
    #[serde(default = "default_launch_copy_gap_ms")]
    pub launch_copy_gap_ms: u64,
    /// Wait after the second relay pull before the open-URL shortcut.
    #[serde(default = "default_launch_paste_wait_ms")]
    pub launch_paste_wait_ms: u64,
    /// Wait after each shortcut of a text entry.
    #[serde(default = "default_text_step_ms")]
    pub text_step_ms: u64,
    /// Target rate of intermediate swipe moves.
    #[serde(default = "default_swipe_rate_hz")]
    pub swipe_rate_hz: u32,
    /// Lower clamp on swipe interpolation steps.
    #[serde(default = "default_swipe_min_steps")]
    pub swipe_min_steps: u32,
    /// Upper clamp on swipe interpolation steps.
    #[serde(default = "default_swipe_max_steps")]
    pub swipe_max_steps: u32,
}

fn default_settle_ms() -> u64 {
    500
}
fn default_double_tap_gap_ms() -> u64 {
    200
}
fn default_swipe_edge_ms() -> u64 {
    200
}
fn default_after_gesture_ms() -> u64 {
    1000
}
fn default_launch_copy_gap_ms() -> u64 {
    500
}
fn default_launch_paste_wait_ms() -> u64 {
    1000
}
fn default_text_step_ms() -> u64 {
    500
}
fn default_swipe_rate_hz() -> u32 {
    60
}
fn default_swipe_min_steps() -> u32 {
    2
}
fn default_swipe_max_steps() -> u32 {
    120
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            settle_ms: default_settle_ms(),
            double_tap_gap_ms: default_double_tap_gap_ms(),
            swipe_edge_ms: default_swipe_edge_ms(),
            after_gesture_ms: default_after_gesture_ms(),
            launch_copy_gap_ms: default_launch_copy_gap_ms(),
            launch_paste_wait_ms: default_launch_paste_wait_ms(),
            text_step_ms: default_text_step_ms(),
            swipe_rate_hz: default_swipe_rate_hz(),
            swipe_min_steps: default_swipe_min_steps(),
            swipe_max_steps: default_swipe_max_steps(),
        }
    }
}

impl PacingConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn double_tap_gap(&self) -> Duration {
        Duration::from_millis(self.double_tap_gap_ms)
    }

    pub fn swipe_edge(&self) -> Duration {
        Duration::from_millis(self.swipe_edge_ms)
    }

    pub fn after_gesture(&self) -> Duration {
        Duration::from_millis(self.after_gesture_ms)
    }

    pub fn launch_copy_gap(&self) -> Duration {
        Duration::from_millis(self.launch_copy_gap_ms)
    }

    pub fn launch_paste_wait(&self) -> Duration {
        Duration::from_millis(self.launch_paste_wait_ms)
    }

    pub fn text_step(&self) -> Duration {
        Duration::from_millis(self.text_step_ms)
    }

    /// Number of interpolation steps for a drag lasting `duration_ms`.
    ///
    /// `floor(duration * rate)`, then clamped so the result is at least
    /// `swipe_min_steps` even if `swipe_max_steps` is configured lower.
    pub fn swipe_steps(&self, duration_ms: u64) -> u32 {
        let raw = duration_ms.saturating_mul(u64::from(self.swipe_rate_hz)) / 1000;
        let raw = u32::try_from(raw).unwrap_or(u32::MAX);
        self.swipe_min_steps.max(raw.min(self.swipe_max_steps))
    }
}

/// One intermediate pointer position of a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipePoint {
    pub x: i32,
    pub y: i32,
    /// When this point is due, measured from the start of the drag.
    pub due: Duration,
}

/// The intermediate moves of a swipe, excluding the explicit start and end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwipePlan {
    points: Vec<SwipePoint>,
}

impl SwipePlan {
    /// Plans the drag from `start` to `end`.
    ///
    /// Returns an empty plan when `duration_ms` is `None`, zero or negative:
    /// the swipe then jumps from start to end while the button is held.
    pub fn new(
        start: (i32, i32),
        end: (i32, i32),
        duration_ms: Option<i64>,
        pacing: &PacingConfig,
    ) -> Self {
        let duration_ms = match duration_ms {
            Some(ms) if ms > 0 => ms.unsigned_abs(),
            _ => return Self::default(),
        };
        let steps = pacing.swipe_steps(duration_ms);
        let duration = Duration::from_millis(duration_ms);

        let points = (1..steps)
            .map(|i| {
                let t = f64::from(i) / f64::from(steps);
                SwipePoint {
                    x: lerp(start.0, end.0, t),
                    y: lerp(start.1, end.1, t),
                    due: duration * i / steps,
                }
            })
            .collect();

        Self { points }
    }

    pub fn points(&self) -> &[SwipePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Linear interpolation rounded half-to-even.
fn lerp(from: i32, to: i32, t: f64) -> i32 {
    let from = f64::from(from);
    let value = from + (f64::from(to) - from) * t;
    value.round_ties_even() as i32
}

// ── Tests ─────────────────────────────────────────────────────────────────────
