#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, ServeArgs, ValidateArgs};
pub use toml_config::{AppConfig, OutputConfig, ServerConfig};
