use crate::core::counting::{count_blocks, count_field};
use crate::core::inject::injector_for;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{InjectionReport, JobKind, PatchResult};
use crate::utils::error::{PresetError, Result};

/// Adds the source field to a preset table file in place.
pub struct AugmentPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> AugmentPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for AugmentPipeline<S, C> {
    fn extract(&self) -> Result<String> {
        let path = self.config.augment_path();
        tracing::debug!("Reading {}", self.storage.resolve(path).display());
        self.storage.read_to_string(path)
    }

    fn transform(&self, content: String) -> Result<PatchResult> {
        let field = self.config.source_field();
        let strategy = self.config.augment_strategy();

        let blocks_before = count_blocks(JobKind::Augment, &content)?;
        let sources_before = count_field(&content, &field.key)?;

        let injection = injector_for(strategy, field)?.inject(&content)?;

        let blocks_after = count_blocks(JobKind::Augment, &injection.content)?;
        let sources_after = count_field(&injection.content, &field.key)?;
        ensure_conserved(blocks_before, blocks_after)?;

        tracing::debug!(
            "Strategy {}: {} block(s), {} → {} `{}` field(s)",
            strategy,
            blocks_before,
            sources_before,
            sources_after,
            field.key
        );

        Ok(PatchResult {
            content: injection.content,
            report: InjectionReport {
                kind: JobKind::Augment,
                strategy,
                blocks_before,
                blocks_after,
                sources_before,
                sources_after,
                inserted: injection.inserted,
                rewrites_applied: 0,
                output_path: self.config.augment_path().to_string(),
                dry_run: false,
            },
        })
    }

    fn load(&self, result: &PatchResult) -> Result<String> {
        let path = self.config.augment_path();
        self.storage.write_string(path, &result.content)?;
        Ok(self.storage.resolve(path).display().to_string())
    }
}

pub(crate) fn ensure_conserved(before: usize, after: usize) -> Result<()> {
    if before != after {
        return Err(PresetError::ProcessingError {
            message: format!(
                "preset count changed from {} to {} during injection",
                before, after
            ),
        });
    }
    Ok(())
}
