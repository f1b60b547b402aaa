pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::HttpModelService;
pub use config::{cli::LocalStorage, toml_config::CallProfile, CallConfig};
pub use crate::core::call::{build_and_send, run_call, ModelCall};
pub use utils::error::{CallError, Result};
