pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, ScrapeArgs};

#[cfg(feature = "bedrock")]
pub use adapters::bedrock::BedrockRuntime;

pub use adapters::sigaa::SigaaScraper;
pub use adapters::storage::LocalStorage;
pub use config::{AgentSettings, ScrapeConfig};
pub use crate::core::{advisor::AdvisorClient, session::Advisor};
pub use utils::error::{AdvisorError, Result};
