pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::toml_config::TomlConfig;
pub use crate::core::agent::{AgentSettings, DeepSearchAgent, HttpAgentFactory};
pub use utils::error::{GatewayError, Result};
