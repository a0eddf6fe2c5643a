//! GestureEngine: turns high-level gestures into paced bridge calls.
//!
//! Each gesture is one `async fn` that awaits its HTTP calls and sleeps in
//! order, so gestures never overlap as long as the caller awaits them one at a
//! time.  The engine holds no per-gesture state and takes `&self`.
//!
//! # Call sequences
//!
//! ```text
//! tap          move · click
//! double_tap   move · settle · click · gap · click · after
//! long_press   move · settle · down · hold · up · after
//! swipe        move(start) · edge · down · [moves on the line] · move(end) · edge · up · after
//! back/home    shortcut · after
//! launch_app   relay push · copy · copy-gap · copy · paste-wait · open-url · after
//! type_text    relay push · copy · step · copy · step · paste · step
//! ```
//!
//! Every sequence is preceded by `set_connected` (see [`ConnectionGuard`]).
//!
//! Tap is unpaced: no settle time and no trailing `after` wait.  Every other
//! gesture ends with `after` (`PacingConfig::after_gesture_ms`).

use std::sync::Arc;

use phone_kvm_core::{
    package_name,
    protocol::{mouse_button, mouse_move, shortcut},
    ButtonState, ContentPayload, Gesture, GestureOutcome, PacingConfig, Shortcut, SwipePlan,
};
use tokio::time::{sleep, sleep_until, Duration, Instant};
use tracing::{debug, info, warn};

use super::guard::ConnectionGuard;
use super::relay::ClipboardRelay;
use super::transport::{HidTransport, TransportError};

/// Executes gestures against the bridge.
pub struct GestureEngine {
    transport: Arc<dyn HidTransport>,
    guard: ConnectionGuard,
    relay: Arc<dyn ClipboardRelay>,
    pacing: PacingConfig,
}

impl GestureEngine {
    pub fn new(
        transport: Arc<dyn HidTransport>,
        relay: Arc<dyn ClipboardRelay>,
        pacing: PacingConfig,
    ) -> Self {
        Self {
            guard: ConnectionGuard::new(Arc::clone(&transport)),
            transport,
            relay,
            pacing,
        }
    }

    // ── Pointer gestures ──────────────────────────────────────────────────────

    /// Moves to `(x, y)` and clicks.  Returns as soon as the click is sent.
    ///
    /// # Errors
    ///
    /// Returns the first [`TransportError`]; later calls are not attempted.
    pub async fn tap(&self, x: i32, y: i32) -> Result<(), TransportError> {
        info!(x, y, "tap");
        self.guard
            .run(|| async {
                self.move_to(x, y).await?;
                self.button(ButtonState::Click).await
            })
            .await
    }

    /// Two clicks at `(x, y)`, `double_tap_gap_ms` apart.
    ///
    /// # Errors
    ///
    /// Returns the first [`TransportError`]; later calls are not attempted.
    pub async fn double_tap(&self, x: i32, y: i32) -> Result<(), TransportError> {
        info!(x, y, "double tap");
        self.guard
            .run(|| async {
                self.move_to(x, y).await?;
                sleep(self.pacing.settle()).await;
                self.button(ButtonState::Click).await?;
                sleep(self.pacing.double_tap_gap()).await;
                self.button(ButtonState::Click).await?;
                sleep(self.pacing.after_gesture()).await;
                Ok(())
            })
            .await
    }

    /// Presses at `(x, y)` and holds for `duration_ms` (negative means zero).
    ///
    /// # Errors
    ///
    /// Returns the first [`TransportError`].  A failure after the press can
    /// leave the button held down on the bridge.
    pub async fn long_press(&self, x: i32, y: i32, duration_ms: i64) -> Result<(), TransportError> {
        let hold = Duration::from_millis(duration_ms.max(0).unsigned_abs());
        info!(x, y, hold_ms = hold.as_millis() as u64, "long press");
        self.guard
            .run(|| async {
                self.move_to(x, y).await?;
                sleep(self.pacing.settle()).await;
                self.button(ButtonState::Down).await?;
                sleep(hold).await;
                self.button(ButtonState::Up).await?;
                sleep(self.pacing.after_gesture()).await;
                Ok(())
            })
            .await
    }

    /// Drags from start to end with the button held.
    ///
    /// With a positive `duration_ms` the pointer follows the straight line at
    /// about `swipe_rate_hz`; otherwise it jumps from start to end.
    ///
    /// # Errors
    ///
    /// Returns the first [`TransportError`].  A failure mid-drag can leave the
    /// button held down on the bridge.
    pub async fn swipe(
        &self,
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
        duration_ms: Option<i64>,
    ) -> Result<(), TransportError> {
        let plan = SwipePlan::new(
            (start_x, start_y),
            (end_x, end_y),
            duration_ms,
            &self.pacing,
        );
        info!(
            start_x,
            start_y,
            end_x,
            end_y,
            ?duration_ms,
            steps = plan.len(),
            "swipe"
        );
        self.guard
            .run(|| async {
                self.move_to(start_x, start_y).await?;
                sleep(self.pacing.swipe_edge()).await;
                self.button(ButtonState::Down).await?;

                // Deadlines are measured from one anchor so slow HTTP calls
                // shorten the following sleeps instead of stretching the drag.
                let anchor = Instant::now();
                for point in plan.points() {
                    self.move_to(point.x, point.y).await?;
                    sleep_until(anchor + point.due).await;
                }

                self.move_to(end_x, end_y).await?;
                sleep(self.pacing.swipe_edge()).await;
                self.button(ButtonState::Up).await?;
                sleep(self.pacing.after_gesture()).await;
                Ok(())
            })
            .await
    }

    // ── Keyboard gestures ─────────────────────────────────────────────────────

    /// Sends the device's "back" shortcut.
    ///
    /// # Errors
    ///
    /// Returns the first [`TransportError`].
    pub async fn back(&self) -> Result<(), TransportError> {
        info!("back");
        self.key_shortcut(&Shortcut::back()).await
    }

    /// Sends the device's "home" shortcut.
    ///
    /// # Errors
    ///
    /// Returns the first [`TransportError`].
    pub async fn home(&self) -> Result<(), TransportError> {
        info!("home");
        self.key_shortcut(&Shortcut::home()).await
    }

    /// Sends an arbitrary key combination.
    ///
    /// # Errors
    ///
    /// Returns the first [`TransportError`].
    pub async fn key_shortcut(&self, keys: &Shortcut) -> Result<(), TransportError> {
        self.guard
            .run(|| async {
                self.shortcut(keys).await?;
                sleep(self.pacing.after_gesture()).await;
                Ok(())
            })
            .await
    }

    /// Opens `app` by display name through the relay.
    ///
    /// Returns `Ok(false)` without any bridge traffic when `app` is not in the
    /// registry.  `Ok(true)` means the launch sequence was sent, not that the
    /// app actually opened.
    ///
    /// # Errors
    ///
    /// Returns the first [`TransportError`] of the bridge calls.  Relay
    /// failures are logged and ignored.
    pub async fn launch_app(&self, app: &str) -> Result<bool, TransportError> {
        let Some(scheme) = package_name(app) else {
            warn!(app, "app is not in the registry");
            return Ok(false);
        };
        info!(app, scheme, "launch app");
        self.guard
            .run(|| async {
                self.push_to_relay(ContentPayload::launch(scheme)).await;
                self.shortcut(&Shortcut::copy()).await?;
                sleep(self.pacing.launch_copy_gap()).await;
                self.shortcut(&Shortcut::copy()).await?;
                sleep(self.pacing.launch_paste_wait()).await;
                self.shortcut(&Shortcut::open_url()).await?;
                sleep(self.pacing.after_gesture()).await;
                Ok(())
            })
            .await?;
        Ok(true)
    }

    /// Types `text` into the focused field by pasting it from the relay.
    ///
    /// # Errors
    ///
    /// Returns the first [`TransportError`] of the bridge calls.  Relay
    /// failures are logged and ignored.
    pub async fn type_text(&self, text: &str) -> Result<(), TransportError> {
        info!(chars = text.chars().count(), "type text");
        self.guard
            .run(|| async {
                self.push_to_relay(ContentPayload::text(text)).await;
                self.shortcut(&Shortcut::copy()).await?;
                sleep(self.pacing.text_step()).await;
                self.shortcut(&Shortcut::copy()).await?;
                sleep(self.pacing.text_step()).await;
                self.shortcut(&Shortcut::paste()).await?;
                sleep(self.pacing.text_step()).await;
                Ok(())
            })
            .await
    }

    /// Performs a serialized gesture.
    ///
    /// # Errors
    ///
    /// Returns the first [`TransportError`] of the gesture.
    pub async fn perform(&self, gesture: &Gesture) -> Result<GestureOutcome, TransportError> {
        debug!(gesture = gesture.name(), "perform");
        match gesture {
            Gesture::Tap { x, y } => self.tap(*x, *y).await?,
            Gesture::DoubleTap { x, y } => self.double_tap(*x, *y).await?,
            Gesture::LongPress { x, y, duration_ms } => {
                self.long_press(*x, *y, *duration_ms).await?
            }
            Gesture::Swipe {
                start_x,
                start_y,
                end_x,
                end_y,
                duration_ms,
            } => {
                self.swipe(*start_x, *start_y, *end_x, *end_y, *duration_ms)
                    .await?
            }
            Gesture::KeyShortcut { keys } => self.key_shortcut(keys).await?,
            Gesture::Back => self.back().await?,
            Gesture::Home => self.home().await?,
            Gesture::LaunchApp { app } => {
                if !self.launch_app(app).await? {
                    return Ok(GestureOutcome::AppNotFound);
                }
            }
            Gesture::TypeText { text } => self.type_text(text).await?,
        }
        Ok(GestureOutcome::Completed)
    }

    // ── Single bridge calls ───────────────────────────────────────────────────

    async fn move_to(&self, x: i32, y: i32) -> Result<(), TransportError> {
        debug!(x, y, "mouse move");
        self.transport.post(&mouse_move(x, y)).await?;
        Ok(())
    }

    async fn button(&self, state: ButtonState) -> Result<(), TransportError> {
        debug!(?state, "mouse button");
        self.transport.post(&mouse_button(state)).await?;
        Ok(())
    }

    async fn shortcut(&self, keys: &Shortcut) -> Result<(), TransportError> {
        debug!(%keys, "shortcut");
        self.transport.post(&shortcut(keys)).await?;
        Ok(())
    }

    async fn push_to_relay(&self, payload: ContentPayload) {
        if let Err(e) = self.relay.push(&payload).await {
            warn!(error = %e, launch_app = payload.launch_app, "clipboard relay push failed; continuing");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
