use crate::domain::model::{PatchResult, Rewrite, SourceField, Strategy};
use crate::utils::error::Result;
use std::path::PathBuf;

pub trait Storage {
    fn resolve(&self, path: &str) -> PathBuf;
    fn read_to_string(&self, path: &str) -> Result<String>;
    fn write_string(&self, path: &str, data: &str) -> Result<()>;
}

pub trait ConfigProvider {
    fn source_field(&self) -> &SourceField;
    fn augment_path(&self) -> &str;
    fn augment_strategy(&self) -> Strategy;
    fn extract_input(&self) -> &str;
    fn extract_output(&self) -> &str;
    fn extract_strategy(&self) -> Strategy;
    fn code_fence(&self) -> Option<&str>;
    fn rewrites(&self) -> &[Rewrite];
}

/// One read-transform-write pass.
pub trait Pipeline {
    fn extract(&self) -> Result<String>;
    fn transform(&self, content: String) -> Result<PatchResult>;
    fn load(&self, result: &PatchResult) -> Result<String>;
}
