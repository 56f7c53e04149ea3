#[cfg(feature = "cli")]
pub mod cli;
pub mod service;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use service::{LabelPolicy, ServiceConfig};
