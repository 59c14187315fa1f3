use crate::core::augment::ensure_conserved;
use crate::core::counting::{count_blocks, count_field};
use crate::core::fence::extract_code_block;
use crate::core::inject::injector_for;
use crate::core::rewrite::apply_rewrites;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{InjectionReport, JobKind, PatchResult};
use crate::utils::error::{PresetError, Result};

/// Turns the preset table embedded in a document into a source file. The
/// document itself is only ever read.
pub struct ExtractPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ExtractPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for ExtractPipeline<S, C> {
    fn extract(&self) -> Result<String> {
        let input = self.config.extract_input();
        let document = self.storage.read_to_string(input)?;

        let Some(fence) = self.config.code_fence() else {
            return Ok(document);
        };
        match extract_code_block(&document, fence)? {
            Some(body) => {
                tracing::debug!("Using ```{} block ({} bytes)", fence, body.len());
                Ok(body.to_string())
            }
            None => Err(PresetError::CodeBlockNotFound {
                path: self.storage.resolve(input),
                fence: fence.to_string(),
            }),
        }
    }

    fn transform(&self, content: String) -> Result<PatchResult> {
        let field = self.config.source_field();
        let strategy = self.config.extract_strategy();

        let (rewritten, rewrites_applied) = apply_rewrites(&content, self.config.rewrites());

        let blocks_before = count_blocks(JobKind::Extract, &rewritten)?;
        let sources_before = count_field(&rewritten, &field.key)?;

        let injection = injector_for(strategy, field)?.inject(&rewritten)?;

        let blocks_after = count_blocks(JobKind::Extract, &injection.content)?;
        let sources_after = count_field(&injection.content, &field.key)?;
        ensure_conserved(blocks_before, blocks_after)?;

        Ok(PatchResult {
            content: injection.content,
            report: InjectionReport {
                kind: JobKind::Extract,
                strategy,
                blocks_before,
                blocks_after,
                sources_before,
                sources_after,
                inserted: injection.inserted,
                rewrites_applied,
                output_path: self.config.extract_output().to_string(),
                dry_run: false,
            },
        })
    }

    fn load(&self, result: &PatchResult) -> Result<String> {
        let output = self.config.extract_output();
        self.storage.write_string(output, &result.content)?;
        Ok(self.storage.resolve(output).display().to_string())
    }
}
