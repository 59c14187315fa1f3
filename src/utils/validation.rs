use crate::utils::error::{PresetError, Result};
use std::path::{Component, Path, PathBuf};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PresetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PresetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PresetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Field keys are spliced into patterns and emitted as object keys.
pub fn validate_identifier(field_name: &str, value: &str) -> Result<()> {
    let mut chars = value.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        return Err(PresetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Must be a plain identifier".to_string(),
        });
    }
    Ok(())
}

/// The value is written inside single quotes.
pub fn validate_quotable(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    if value.contains(['\'', '\\', '\n', '\r']) {
        return Err(PresetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot contain quotes, backslashes or line breaks".to_string(),
        });
    }
    Ok(())
}

/// Rejects an output path that names the input file.
pub fn validate_distinct_paths(input: &str, output: &str) -> Result<()> {
    if normalize(Path::new(input)) == normalize(Path::new(output)) {
        return Err(PresetError::ConfigValidationError {
            field: "extract.output".to_string(),
            message: format!("Output path must differ from the input path ({})", input),
        });
    }
    Ok(())
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("augment.path", "theme-presets.ts").is_ok());
        assert!(validate_path("augment.path", "").is_err());
        assert!(validate_path("augment.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("field.key", "source").is_ok());
        assert!(validate_identifier("field.key", "_private$").is_ok());
        assert!(validate_identifier("field.key", "").is_err());
        assert!(validate_identifier("field.key", "1abc").is_err());
        assert!(validate_identifier("field.key", "la bel").is_err());
    }

    #[test]
    fn test_validate_quotable() {
        assert!(validate_quotable("field.value", "BUILT_IN").is_ok());
        assert!(validate_quotable("field.value", "it's").is_err());
        assert!(validate_quotable("field.value", "  ").is_err());
    }

    #[test]
    fn test_validate_distinct_paths() {
        assert!(validate_distinct_paths("docs/PRESETS.md", "app/config/presets.ts").is_ok());
        assert!(validate_distinct_paths("docs/PRESETS.md", "./docs/PRESETS.md").is_err());
        assert!(validate_distinct_paths("docs/PRESETS.md", "app/../docs/PRESETS.md").is_err());
    }
}
