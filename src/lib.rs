pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::storage::{InMemoryStorage, LocalStorage};
pub use config::toml_config::TomlConfig;
pub use core::store::RaceResultsStore;
pub use domain::model::{Duration, RaceResult, Standing};
pub use utils::error::{RaceError, Result};
