pub mod jobs;

pub use jobs::{report_failure, run_audit, run_augment, run_extract};
