//! # phone-kvm-core
//!
//! Shared library for Phone-KVM containing the gesture vocabulary, swipe
//! pacing planner, HID key names, the app registry, and the payload types
//! exchanged with the KVM bridge and the clipboard relay.
//!
//! This crate is used by both the agent and the relay server.
//! It has zero dependencies on sockets, HTTP clients, image codecs, or timers.
//!
//! # Architecture overview (for beginners)
//!
//! Phone-KVM drives a phone or tablet through a KVM-over-IP appliance (for
//! example a PiKVM) that is plugged into the device as a USB keyboard and
//! mouse.  The appliance exposes an HTTPS API: "move the pointer to (x, y)",
//! "press the left button", "send this key combination", "give me a
//! snapshot of the screen".  An orchestrating agent thinks in *gestures*
//! (tap here, swipe from there to there); this workspace turns gestures into
//! a paced stream of those HTTP calls.
//!
//! This crate (`phone-kvm-core`) is the shared foundation.  It defines:
//!
//! - **`domain`** – Pure business types: [`Gesture`] descriptors, the
//!   [`PacingConfig`] timing table and [`SwipePlan`] interpolation, the
//!   static app registry, and the [`Screenshot`] result.
//!
//! - **`keymap`** – USB HID key codes and their DOM `KeyboardEvent.code`
//!   names, which is the spelling the bridge's shortcut endpoint expects.
//!
//! - **`protocol`** – The exact endpoint strings understood by the bridge and
//!   the JSON payloads of the clipboard relay.

pub mod domain;
pub mod keymap;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `phone_kvm_core::Gesture` instead of `phone_kvm_core::domain::gesture::Gesture`.
pub use domain::apps::{app_name, package_name, supported_apps};
pub use domain::gesture::{Gesture, GestureOutcome};
pub use domain::pacing::{PacingConfig, SwipePlan, SwipePoint};
pub use domain::screenshot::{Screenshot, ScreenshotConfig};
pub use keymap::hid::HidKeyCode;
pub use keymap::{Shortcut, ShortcutError};
pub use protocol::endpoints::ButtonState;
pub use protocol::relay::{ContentPayload, ContentResponse};
