pub mod audit;
pub mod augment;
pub mod counting;
pub mod engine;
pub mod extract;
pub mod fence;
pub mod inject;
pub mod rewrite;
pub mod scanner;

pub use crate::domain::model::{InjectionReport, PatchResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
