//! Infrastructure layer of the relay: the HTTP surface.
//!
//! **Dependency rule**: this layer may depend on `application`, `domain` and
//! `phone_kvm_core`, but MUST NOT be imported by the `application` layer.

pub mod http_server;

pub use http_server::{router, run_server, serve, RelayServerError};
