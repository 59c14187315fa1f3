use serde::{Deserialize, Serialize};
use std::fmt;

/// The field injected into preset blocks that lack it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceField {
    pub key: String,
    pub value: String,
    /// Field the injected line is placed in front of.
    pub anchor: String,
}

impl Default for SourceField {
    fn default() -> Self {
        Self {
            key: "source".to_string(),
            value: "BUILT_IN".to_string(),
            anchor: "label".to_string(),
        }
    }
}

impl SourceField {
    /// `source: 'BUILT_IN',`
    pub fn render(&self) -> String {
        format!("{}: '{}',", self.key, self.value)
    }
}

/// A literal text substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewrite {
    pub from: String,
    pub to: String,
}

impl Rewrite {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn theme_defaults() -> Vec<Rewrite> {
        vec![
            Rewrite::new(
                "import { ThemePreset } from '../types/theme'",
                "import type { ThemePreset, ThemePresets } from '~/types/theme'",
            ),
            Rewrite::new("Record<string, ThemePreset>", "ThemePresets"),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Opening line immediately followed by the anchor line.
    Line,
    /// Lazy brace-free span up to the first anchor.
    Span,
    /// Brace-depth scan of every block.
    Structural,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Line => write!(f, "line"),
            Strategy::Span => write!(f, "span"),
            Strategy::Structural => write!(f, "structural"),
        }
    }
}

/// A top-level `key:` inside a preset block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpan {
    pub key: String,
    pub offset: usize,
}

/// `'<name>': { ... }` located by the structural scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetBlock {
    pub name: String,
    /// Offset of the opening quote of the name.
    pub start: usize,
    /// Offset just past the opening brace.
    pub body_start: usize,
    /// Offset of the closing brace.
    pub body_end: usize,
    pub fields: Vec<FieldSpan>,
}

impl PresetBlock {
    pub fn field(&self, key: &str) -> Option<&FieldSpan> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn field_count(&self, key: &str) -> usize {
        self.fields.iter().filter(|f| f.key == key).count()
    }

    pub fn text<'a>(&self, content: &'a str) -> &'a str {
        &content[self.start..=self.body_end]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Augment,
    Extract,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionReport {
    pub kind: JobKind,
    pub strategy: Strategy,
    pub blocks_before: usize,
    pub blocks_after: usize,
    pub sources_before: usize,
    pub sources_after: usize,
    pub inserted: usize,
    pub rewrites_applied: usize,
    pub output_path: String,
    pub dry_run: bool,
}

impl InjectionReport {
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = match self.kind {
            JobKind::Augment => vec![
                format!("✅ Processed {} presets", self.blocks_before),
                format!(
                    "✅ Added source property: {} → {}",
                    self.sources_before, self.sources_after
                ),
            ],
            JobKind::Extract => vec![
                format!("✅ Successfully extracted {} presets", self.blocks_after),
                format!("   File: {}", self.output_path),
            ],
        };
        if self.dry_run {
            lines.push(format!(
                "🔍 Dry run: {} insertion(s) not written to {}",
                self.inserted, self.output_path
            ));
        }
        lines
    }
}

/// Result of a transform: the new text and what changed.
#[derive(Debug, Clone)]
pub struct PatchResult {
    pub content: String,
    pub report: InjectionReport,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub blocks: usize,
    pub missing: Vec<String>,
    pub duplicated: Vec<String>,
}

impl AuditReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.duplicated.is_empty()
    }

    pub fn summary_lines(&self, field: &str) -> Vec<String> {
        let mut lines = vec![format!("📋 Scanned {} presets", self.blocks)];
        if !self.missing.is_empty() {
            lines.push(format!("⚠️  Presets without `{}`:", field));
            lines.extend(self.missing.iter().map(|name| format!("   ✗ {}", name)));
        }
        if !self.duplicated.is_empty() {
            lines.push(format!("⚠️  Presets declaring `{}` more than once:", field));
            lines.extend(self.duplicated.iter().map(|name| format!("   ✗ {}", name)));
        }
        if self.is_complete() {
            lines.push(format!("✓ Every preset has exactly one `{}` field", field));
        } else {
            lines.push(format!(
                "Found {} issue(s) to review",
                self.missing.len() + self.duplicated.len()
            ));
        }
        lines
    }
}
