use crate::core::scanner::scan_blocks;
use crate::domain::model::{PresetBlock, SourceField, Strategy};
use crate::utils::error::Result;
use regex::{Captures, Regex};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    pub content: String,
    pub inserted: usize,
}

/// Adds the source field to preset blocks that do not declare it.
/// Blocks that already declare it come out byte-identical.
pub trait FieldInjector {
    fn inject(&self, content: &str) -> Result<Injection>;
}

pub fn injector_for(strategy: Strategy, field: &SourceField) -> Result<Box<dyn FieldInjector>> {
    let injector: Box<dyn FieldInjector> = match strategy {
        Strategy::Line => Box::new(LineInjector::new(field)?),
        Strategy::Span => Box::new(SpanInjector::new(field)?),
        Strategy::Structural => Box::new(StructuralInjector::new(field.clone())),
    };
    Ok(injector)
}

/// Start offsets of the blocks that already declare `key` at their top level.
/// Text the scanner cannot read yields an empty set and the pattern-level
/// checks still apply.
fn declaring_blocks(content: &str, key: &str) -> HashSet<usize> {
    match scan_blocks(content) {
        Ok(blocks) => blocks
            .iter()
            .filter(|block| block.field(key).is_some())
            .map(|block| block.start)
            .collect(),
        Err(e) => {
            tracing::debug!("Block lookup unavailable, relying on the pattern alone: {}", e);
            HashSet::new()
        }
    }
}

/// Line ending of the line break at `newline`.
fn line_ending(text: &str, newline: usize) -> &'static str {
    if text[..newline].ends_with('\r') {
        "\r\n"
    } else {
        "\n"
    }
}

/// Matches a block opener at two-space indent whose very next line is the
/// anchor at four-space indent. Anything else is left alone, including blocks
/// whose anchor is not the first field.
pub struct LineInjector {
    pattern: Regex,
    key: String,
    rendered: String,
}

impl LineInjector {
    pub fn new(field: &SourceField) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"(  '[^']+': \{{\r?\n)(    {}:)",
            regex::escape(&field.anchor)
        ))?;
        Ok(Self {
            pattern,
            key: field.key.clone(),
            rendered: field.render(),
        })
    }
}

impl FieldInjector for LineInjector {
    fn inject(&self, content: &str) -> Result<Injection> {
        let declared = declaring_blocks(content, &self.key);
        let mut inserted = 0;
        let replaced = self.pattern.replace_all(content, |caps: &Captures| {
            // The name's quote follows the two-space indent.
            let block_start = caps.get(0).map_or(0, |m| m.start()) + 2;
            if declared.contains(&block_start) {
                return caps[0].to_string();
            }
            inserted += 1;
            let eol = if caps[1].ends_with("\r\n") { "\r\n" } else { "\n" };
            format!("{}    {}{}{}", &caps[1], self.rendered, eol, &caps[2])
        });
        Ok(Injection {
            content: replaced.into_owned(),
            inserted,
        })
    }
}

/// Lazily spans from `'<name>': {` to the first anchor, refusing to cross a
/// closing brace. A block with nested braces before its anchor never matches.
pub struct SpanInjector {
    pattern: Regex,
    key: String,
    marker: String,
    anchor_len: usize,
    rendered: String,
}

impl SpanInjector {
    pub fn new(field: &SourceField) -> Result<Self> {
        let anchor = format!("{}:", field.anchor);
        let pattern = Regex::new(&format!(
            r"'[\w-]+':\s*\{{[^}}]*?{}",
            regex::escape(&anchor)
        ))?;
        Ok(Self {
            pattern,
            key: field.key.clone(),
            marker: format!("{}:", field.key),
            anchor_len: anchor.len(),
            rendered: field.render(),
        })
    }

    fn insert(&self, span: &str) -> Option<String> {
        if span.contains(&self.marker) {
            return None;
        }
        let (before, anchor) = span.split_at(span.len() - self.anchor_len);
        let separator = match before.rfind('\n') {
            Some(pos) if before[pos + 1..].trim().is_empty() => {
                format!("{}{}", line_ending(before, pos), &before[pos + 1..])
            }
            _ => " ".to_string(),
        };
        Some(format!("{}{}{}{}", before, self.rendered, separator, anchor))
    }
}

impl FieldInjector for SpanInjector {
    fn inject(&self, content: &str) -> Result<Injection> {
        let declared = declaring_blocks(content, &self.key);
        let mut inserted = 0;
        let replaced = self.pattern.replace_all(content, |caps: &Captures| {
            let block_start = caps.get(0).map_or(0, |m| m.start());
            if declared.contains(&block_start) {
                return caps[0].to_string();
            }
            match self.insert(&caps[0]) {
                Some(updated) => {
                    inserted += 1;
                    updated
                }
                None => caps[0].to_string(),
            }
        });
        Ok(Injection {
            content: replaced.into_owned(),
            inserted,
        })
    }
}

/// Uses the brace-depth scanner, so nesting and field order do not matter.
pub struct StructuralInjector {
    field: SourceField,
}

impl StructuralInjector {
    pub fn new(field: SourceField) -> Self {
        Self { field }
    }

    fn edit_for(&self, content: &str, block: &PresetBlock) -> (usize, String) {
        let rendered = self.field.render();
        let target = block
            .field(&self.field.anchor)
            .or_else(|| block.fields.first());

        match target {
            Some(target) => {
                let newline = content[..target.offset].rfind('\n');
                let line_start = newline.map_or(0, |p| p + 1);
                let indent = &content[line_start..target.offset];
                if indent.trim().is_empty() {
                    let eol = newline.map_or("\n", |p| line_ending(content, p));
                    (target.offset, format!("{}{}{}", rendered, eol, indent))
                } else {
                    (target.offset, format!("{} ", rendered))
                }
            }
            None => (block.body_start, format!(" {} ", rendered)),
        }
    }
}

impl FieldInjector for StructuralInjector {
    fn inject(&self, content: &str) -> Result<Injection> {
        let edits: Vec<(usize, String)> = scan_blocks(content)?
            .iter()
            .filter(|block| block.field(&self.field.key).is_none())
            .map(|block| self.edit_for(content, block))
            .collect();

        let mut output = String::with_capacity(content.len() + edits.len() * 32);
        let mut cursor = 0;
        for (offset, text) in &edits {
            output.push_str(&content[cursor..*offset]);
            output.push_str(text);
            cursor = *offset;
        }
        output.push_str(&content[cursor..]);

        Ok(Injection {
            content: output,
            inserted: edits.len(),
        })
    }
}
