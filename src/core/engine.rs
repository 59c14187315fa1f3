use crate::core::Pipeline;
use crate::domain::model::InjectionReport;
use crate::utils::error::Result;

pub struct PatchEngine<P: Pipeline> {
    pipeline: P,
    dry_run: bool,
}

impl<P: Pipeline> PatchEngine<P> {
    pub fn with_dry_run(pipeline: P, dry_run: bool) -> Self {
        Self { pipeline, dry_run }
    }

    pub fn run(&self) -> Result<InjectionReport> {
        tracing::info!("📖 Reading input...");
        let content = self.pipeline.extract()?;
        tracing::debug!("Read {} bytes", content.len());

        tracing::info!("🛠️ Transforming...");
        let mut result = self.pipeline.transform(content)?;
        tracing::info!(
            "Inserted {} field(s) into {} preset(s) using the {} strategy",
            result.report.inserted,
            result.report.blocks_after,
            result.report.strategy
        );

        if self.dry_run {
            tracing::info!("🔍 DRY RUN MODE - nothing written");
            result.report.dry_run = true;
            return Ok(result.report);
        }

        tracing::info!("💾 Writing output...");
        let written = self.pipeline.load(&result)?;
        tracing::info!("📁 Output saved to: {}", written);

        Ok(result.report)
    }
}
