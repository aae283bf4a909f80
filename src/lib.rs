pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{gemini::GeminiStructurer, storage::LocalStorage};
pub use core::{
    etl::{EtlEngine, RunOutcome},
    pipeline::CvPipeline,
};
pub use domain::model::{CvRecord, FlatRecord};
pub use utils::error::{EtlError, Result};
