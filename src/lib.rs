pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod ui;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{PageConfig, RelayConfig};
pub use core::relay::{ContactRelay, RelayError};
pub use ui::{InteractionController, SlideLink};
pub use utils::error::{FolioError, Result};
