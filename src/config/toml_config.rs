use crate::core::ConfigProvider;
use crate::domain::model::{Rewrite, SourceField, Strategy};
use crate::utils::error::{PresetError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "preset-source.toml";

/// Every section is optional; an empty file yields the built-in theme setup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub field: SourceField,
    pub augment: AugmentConfig,
    pub extract: ExtractConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentConfig {
    pub path: String,
    pub strategy: Strategy,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            path: "theme-presets.ts".to_string(),
            strategy: Strategy::Line,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub input: String,
    pub output: String,
    pub strategy: Strategy,
    /// Language tag of the fenced block to extract; the whole document when unset.
    pub code_fence: Option<String>,
    pub rewrites: Vec<Rewrite>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input: "docs/PRESETS.md".to_string(),
            output: "app/config/presets.ts".to_string(),
            strategy: Strategy::Span,
            code_fence: None,
            rewrites: Rewrite::theme_defaults(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write through a temporary file renamed into place.
    pub atomic: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { atomic: true }
    }
}

impl TomlConfig {
    /// Loads and parses a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| PresetError::file(path, e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Loads `explicit` when given, else `preset-source.toml` under `root`
    /// when it exists, else the defaults.
    pub fn discover(root: &Path, explicit: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::info!("📁 Loading configuration from: {}", path);
            return Self::from_file(path);
        }
        let candidate = root.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::info!("📁 Loading configuration from: {}", candidate.display());
            return Self::from_file(candidate);
        }
        tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
        Ok(Self::default())
    }

    /// Replaces `${VAR}` references with environment values; unknown ones stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn override_augment(&mut self, path: Option<String>, strategy: Option<Strategy>) {
        if let Some(path) = path {
            self.augment.path = path;
        }
        if let Some(strategy) = strategy {
            tracing::info!("🔧 Augment strategy overridden to: {}", strategy);
            self.augment.strategy = strategy;
        }
    }

    pub fn override_extract(
        &mut self,
        input: Option<String>,
        output: Option<String>,
        code_fence: Option<String>,
        strategy: Option<Strategy>,
    ) {
        if let Some(input) = input {
            self.extract.input = input;
        }
        if let Some(output) = output {
            self.extract.output = output;
        }
        if code_fence.is_some() {
            self.extract.code_fence = code_fence;
        }
        if let Some(strategy) = strategy {
            tracing::info!("🔧 Extract strategy overridden to: {}", strategy);
            self.extract.strategy = strategy;
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_identifier("field.key", &self.field.key)?;
        validation::validate_identifier("field.anchor", &self.field.anchor)?;
        validation::validate_quotable("field.value", &self.field.value)?;
        if self.field.key == self.field.anchor {
            return Err(PresetError::ConfigValidationError {
                field: "field.anchor".to_string(),
                message: "Anchor must be a different field than the injected key".to_string(),
            });
        }

        validation::validate_path("augment.path", &self.augment.path)?;
        validation::validate_path("extract.input", &self.extract.input)?;
        validation::validate_path("extract.output", &self.extract.output)?;
        validation::validate_distinct_paths(&self.extract.input, &self.extract.output)?;

        if let Some(fence) = &self.extract.code_fence {
            validation::validate_non_empty_string("extract.code_fence", fence)?;
        }

        for (index, rewrite) in self.extract.rewrites.iter().enumerate() {
            if rewrite.from.is_empty() {
                return Err(PresetError::InvalidConfigValueError {
                    field: format!("extract.rewrites[{}].from", index),
                    value: String::new(),
                    reason: "Rewrite source text cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn source_field(&self) -> &SourceField {
        &self.field
    }

    fn augment_path(&self) -> &str {
        &self.augment.path
    }

    fn augment_strategy(&self) -> Strategy {
        self.augment.strategy
    }

    fn extract_input(&self) -> &str {
        &self.extract.input
    }

    fn extract_output(&self) -> &str {
        &self.extract.output
    }

    fn extract_strategy(&self) -> Strategy {
        self.extract.strategy
    }

    fn code_fence(&self) -> Option<&str> {
        self.extract.code_fence.as_deref()
    }

    fn rewrites(&self) -> &[Rewrite] {
        &self.extract.rewrites
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
