//! phone-kvm-relay library entry point.
//!
//! The relay is a one-slot mailbox.  The agent stores a piece of text (or an
//! app URL scheme) with `POST /content`; the companion app on the phone,
//! woken by a keyboard shortcut, fetches it with `GET /content` and puts it on
//! the device clipboard.  Nothing is persisted and the last write wins.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.

pub mod application;
pub mod domain;
pub mod infrastructure;
