use crate::config::cli::LocalStorage;
use crate::config::toml_config::TomlConfig;
use crate::core::audit::audit;
use crate::core::augment::AugmentPipeline;
use crate::core::engine::PatchEngine;
use crate::core::extract::ExtractPipeline;
use crate::core::{ConfigProvider, Storage};
use crate::domain::model::{AuditReport, InjectionReport};
use crate::utils::error::{PresetError, Result};
use crate::utils::validation::Validate;
use std::path::Path;

fn storage_for(root: &Path, config: &TomlConfig) -> LocalStorage {
    LocalStorage::new(root).with_atomic_writes(config.output.atomic)
}

/// Field-Injector A: rewrites the augment path in place.
pub fn run_augment(config: TomlConfig, root: &Path, dry_run: bool) -> Result<InjectionReport> {
    config.validate()?;
    tracing::info!("🚀 Adding `{}` to presets in {}", config.field.key, config.augment.path);

    let storage = storage_for(root, &config);
    let engine = PatchEngine::with_dry_run(AugmentPipeline::new(storage, config), dry_run);
    engine.run()
}

/// Field-Injector B: reads the document and writes the separate output file.
pub fn run_extract(config: TomlConfig, root: &Path, dry_run: bool) -> Result<InjectionReport> {
    config.validate()?;
    tracing::info!(
        "🚀 Extracting presets from {} to {}",
        config.extract.input,
        config.extract.output
    );

    let storage = storage_for(root, &config);
    let engine = PatchEngine::with_dry_run(ExtractPipeline::new(storage, config), dry_run);
    engine.run()
}

/// Read-only completeness check of `path` (default: the augment path).
pub fn run_audit(config: &TomlConfig, root: &Path, path: Option<&str>) -> Result<AuditReport> {
    config.validate()?;
    let path = path.unwrap_or_else(|| config.augment_path());
    tracing::info!("🔍 Auditing {}", path);

    let content = storage_for(root, config).read_to_string(path)?;
    audit(&content, &config.source_field().key)
}

/// Logs and prints a failure, returning the exit code to use.
pub fn report_failure(e: &PresetError) -> i32 {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    e.exit_code()
}
