//! Configuration persistence for the agent.

pub mod config;

pub use config::{load_config, parse_config, AgentConfig, BridgeConfig, ConfigError};
