#[cfg(feature = "cli")]
pub mod cli;
pub mod page;
pub mod relay;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use page::PageConfig;
pub use relay::RelayConfig;
