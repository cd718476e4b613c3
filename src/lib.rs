pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::AppConfig;

pub use adapters::{LocalStorage, MemoryStorage};
pub use crate::core::{engine::ValidationEngine, pipeline::ValidationPipeline};
pub use utils::error::{Result, ValidatorError};
