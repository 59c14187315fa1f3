pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, CommonArgs};

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use self::core::{augment::AugmentPipeline, engine::PatchEngine, extract::ExtractPipeline};
pub use domain::model::{AuditReport, InjectionReport, Rewrite, SourceField, Strategy};
pub use utils::error::{PresetError, Result};
