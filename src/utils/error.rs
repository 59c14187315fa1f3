use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PresetError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cannot access {}: {source}", path.display())]
    FileError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No ```{fence} code block found in {}", path.display())]
    CodeBlockNotFound { path: PathBuf, fence: String },

    #[error("Cannot scan preset table at line {line}: {message}")]
    ScanError { line: usize, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Content,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl PresetError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PresetError::IoError(_) | PresetError::FileError { .. } => ErrorCategory::Io,
            PresetError::TomlError(_)
            | PresetError::ConfigValidationError { .. }
            | PresetError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PresetError::CodeBlockNotFound { .. } | PresetError::ScanError { .. } => {
                ErrorCategory::Content
            }
            PresetError::PatternError(_) | PresetError::ProcessingError { .. } => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Content => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for this error. Every failure is non-zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PresetError::FileError { path, source } => match source.kind() {
                std::io::ErrorKind::NotFound => format!("File not found: {}", path.display()),
                std::io::ErrorKind::PermissionDenied => {
                    format!("Permission denied: {}", path.display())
                }
                _ => format!("Could not access {}: {}", path.display(), source),
            },
            PresetError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            PresetError::ScanError { line, .. } => {
                format!("Could not read the preset table near line {}", line)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PresetError::IoError(_) | PresetError::FileError { .. } => {
                "Check that the path is correct relative to the repository root (--root)"
            }
            PresetError::TomlError(_)
            | PresetError::ConfigValidationError { .. }
            | PresetError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or the command-line overrides"
            }
            PresetError::CodeBlockNotFound { .. } => {
                "Make sure the document contains the fenced block or unset extract.code_fence"
            }
            PresetError::ScanError { .. } => {
                "Fix the preset table or use the line/span strategy"
            }
            PresetError::PatternError(_) => "Use a plain identifier for field.key and field.anchor",
            PresetError::ProcessingError { .. } => {
                "The input was left untouched; inspect it with `preset-source audit`"
            }
        }
    }

    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PresetError::FileError {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PresetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_message() {
        let err = PresetError::file(
            "theme-presets.ts",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.user_friendly_message(), "File not found: theme-presets.ts");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_processing_error_is_critical() {
        let err = PresetError::ProcessingError {
            message: "block count changed".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_scan_error_covers_any_scan_failure() {
        let err = crate::core::scanner::scan_blocks("'x': { /* open\n").unwrap_err();
        assert!(matches!(err, PresetError::ScanError { line: 1, .. }));
        assert_eq!(
            err.to_string(),
            "Cannot scan preset table at line 1: unterminated block comment"
        );
        assert_eq!(err.category(), ErrorCategory::Content);
    }
}
