//! Infrastructure layer for the agent.
//!
//! Contains the adapters behind the application-layer traits: the HTTPS
//! bridge client and its dry-run double, the relay HTTP client, the image
//! processors, and TOML configuration loading.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `phone_kvm_core`, but MUST NOT be imported by the `application` layer.

pub mod frame;
pub mod relay;
pub mod storage;
pub mod transport;
