use crate::core::scanner::scan_blocks;
use crate::domain::model::AuditReport;
use crate::utils::error::Result;

/// Checks that every preset declares `key` exactly once at its top level.
pub fn audit(content: &str, key: &str) -> Result<AuditReport> {
    let blocks = scan_blocks(content)?;
    let mut report = AuditReport {
        blocks: blocks.len(),
        ..AuditReport::default()
    };

    for block in &blocks {
        match block.field_count(key) {
            0 => {
                tracing::debug!("Preset '{}' has no `{}`:\n{}", block.name, key, block.text(content));
                report.missing.push(block.name.clone());
            }
            1 => {}
            n => {
                tracing::debug!("Preset '{}' declares `{}` {} times", block.name, key, n);
                report.duplicated.push(block.name.clone());
            }
        }
    }

    Ok(report)
}
