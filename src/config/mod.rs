pub mod agent;
#[cfg(feature = "cli")]
pub mod cli;
pub mod scrape;

pub use agent::AgentSettings;
#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, ScrapeArgs};
pub use scrape::ScrapeConfig;
