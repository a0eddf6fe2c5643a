//! Domain types of the relay server.

pub mod config;

pub use config::RelayConfig;
