pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
pub use config::toml_config::SiteConfig;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{engine::BuildEngine, pipeline::SitePipeline, registry::Registry};
pub use utils::error::{Result, SiteError};
