//! Brace-depth scanner for preset tables.
//!
//! Not a TypeScript parser: it only knows about strings, comments and the
//! three bracket pairs, which is enough to find where each `'<name>': {` block
//! ends and which keys sit directly inside it.

use crate::domain::model::{FieldSpan, PresetBlock};
use crate::utils::error::{PresetError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Str,
    Ident,
    Open(u8),
    Close(u8),
    Colon,
    Comma,
    Other,
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: TokenKind,
    start: usize,
    end: usize,
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

pub(crate) fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}

/// Offsets are byte offsets; every structural character is ASCII so they
/// always land on char boundaries.
fn lex(content: &str) -> Result<Vec<Token>> {
    let bytes = content.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let kind = match bytes[i] {
            b' ' | b'\t' | b'\n' | b'\r' => {
                i += 1;
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = content[i..].find('\n').map_or(bytes.len(), |p| i + p);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                match content[i + 2..].find("*/") {
                    Some(p) => i = i + 2 + p + 2,
                    None => {
                        return Err(PresetError::ScanError {
                            line: line_of(content, i),
                            message: "unterminated block comment".to_string(),
                        })
                    }
                }
                continue;
            }
            // Markdown fences around the table.
            b'`' if content[i..].starts_with("```") => {
                i += 3;
                TokenKind::Other
            }
            quote @ (b'\'' | b'"' | b'`') => match string_end(bytes, i, quote) {
                Some(end) => {
                    i = end;
                    TokenKind::Str
                }
                // Stray apostrophe in prose.
                None => {
                    i += 1;
                    TokenKind::Other
                }
            },
            open @ (b'{' | b'[' | b'(') => {
                i += 1;
                TokenKind::Open(open)
            }
            close @ (b'}' | b']' | b')') => {
                i += 1;
                TokenKind::Close(close)
            }
            b':' => {
                i += 1;
                TokenKind::Colon
            }
            b',' => {
                i += 1;
                TokenKind::Comma
            }
            b if is_ident_byte(b) => {
                while i < bytes.len() && is_ident_byte(bytes[i]) {
                    i += 1;
                }
                TokenKind::Ident
            }
            _ => {
                i += 1;
                TokenKind::Other
            }
        };
        tokens.push(Token { kind, start, end: i });
    }

    Ok(tokens)
}

/// End offset (past the closing quote) of the string opened at `start`.
/// Single and double quoted strings may not cross a line break.
fn string_end(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if quote != b'`' => return None,
            b if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

fn matching(open: u8) -> u8 {
    match open {
        b'{' => b'}',
        b'[' => b']',
        _ => b')',
    }
}

fn is_preset_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

fn key_text<'a>(content: &'a str, token: &Token) -> &'a str {
    match token.kind {
        TokenKind::Str => &content[token.start + 1..token.end - 1],
        _ => &content[token.start..token.end],
    }
}

fn block_name(content: &str, tokens: &[Token], i: usize) -> Option<String> {
    let [key, colon, brace] = tokens.get(i..i + 3)? else {
        return None;
    };
    let quoted = key.kind == TokenKind::Str && content.as_bytes()[key.start] != b'`';
    if !quoted || colon.kind != TokenKind::Colon || brace.kind != TokenKind::Open(b'{') {
        return None;
    }
    let name = key_text(content, key);
    is_preset_name(name).then(|| name.to_string())
}

fn parse_block(
    content: &str,
    tokens: &[Token],
    i: usize,
    name: String,
) -> Result<(PresetBlock, usize)> {
    let open = tokens[i + 2];
    let mut stack = vec![b'{'];
    let mut fields = Vec::new();
    let mut expect_key = true;
    let mut j = i + 3;

    while j < tokens.len() {
        let token = tokens[j];
        let top_level = stack.len() == 1;
        match token.kind {
            TokenKind::Open(delim) => {
                stack.push(delim);
                expect_key = false;
            }
            TokenKind::Close(delim) => {
                let expected = stack.pop().map(matching);
                if expected != Some(delim) {
                    return Err(PresetError::ScanError {
                        line: line_of(content, token.start),
                        message: format!(
                            "unexpected '{}' in preset '{}'",
                            delim as char, name
                        ),
                    });
                }
                if stack.is_empty() {
                    let block = PresetBlock {
                        name,
                        start: tokens[i].start,
                        body_start: open.end,
                        body_end: token.start,
                        fields,
                    };
                    return Ok((block, j + 1));
                }
            }
            TokenKind::Comma if top_level => expect_key = true,
            TokenKind::Ident | TokenKind::Str
                if top_level
                    && expect_key
                    && tokens.get(j + 1).map(|t| t.kind) == Some(TokenKind::Colon) =>
            {
                fields.push(FieldSpan {
                    key: key_text(content, &token).to_string(),
                    offset: token.start,
                });
                expect_key = false;
            }
            _ if top_level => expect_key = false,
            _ => {}
        }
        j += 1;
    }

    Err(PresetError::ScanError {
        line: line_of(content, open.start),
        message: format!("preset '{}' is never closed", name),
    })
}

/// Every `'<name>': { ... }` block that is not nested inside another one,
/// in source order.
pub fn scan_blocks(content: &str) -> Result<Vec<PresetBlock>> {
    let tokens = lex(content)?;
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        match block_name(content, &tokens, i) {
            Some(name) => {
                let (block, next) = parse_block(content, &tokens, i, name)?;
                tracing::trace!("Found preset '{}' with {} fields", block.name, block.fields.len());
                blocks.push(block);
                i = next;
            }
            None => i += 1,
        }
    }

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"import type { ThemePreset, ThemePresets } from '~/types/theme'

export const defaultPresets: ThemePresets = {
  'ocean-blue': {
    label: 'Ocean Blue',
    colors: { primary: '#0af', 'on-primary': '#fff' },
    source: 'BUILT_IN',
  },
  // 'commented': { label: 'nope' },
  "forest": { label: 'Forest {dark}', tags: ['a', 'b'] },
}
"#;

    #[test]
    fn test_scan_finds_top_level_blocks() {
        let blocks = scan_blocks(TABLE).unwrap();
        let names: Vec<_> = blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["ocean-blue", "forest"]);
    }

    #[test]
    fn test_scan_records_only_top_level_fields() {
        let blocks = scan_blocks(TABLE).unwrap();
        let keys: Vec<_> = blocks[0].fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["label", "colors", "source"]);

        let keys: Vec<_> = blocks[1].fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["label", "tags"]);
    }

    #[test]
    fn test_block_text_spans_braces() {
        let blocks = scan_blocks(TABLE).unwrap();
        let text = blocks[1].text(TABLE);
        assert!(text.starts_with("\"forest\": {"));
        assert!(text.ends_with("['a', 'b'] }"));
    }

    #[test]
    fn test_field_offset_points_at_key() {
        let blocks = scan_blocks(TABLE).unwrap();
        let label = blocks[0].field("label").unwrap();
        assert!(TABLE[label.offset..].starts_with("label: 'Ocean Blue'"));
    }

    #[test]
    fn test_unclosed_block_reports_line() {
        let err = scan_blocks("const a = {\n  'x': {\n    label: 'X',\n").unwrap_err();
        match err {
            PresetError::ScanError { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_mismatched_bracket_is_an_error() {
        assert!(scan_blocks("'x': { tags: ['a' } ]").is_err());
    }

    #[test]
    fn test_markdown_prose_and_fences_are_skipped() {
        let doc = "Here's the table:\n\n```ts\nconst p = {\n  'a': { label: 'A' },\n}\n```\nThat's all.\n";
        let blocks = scan_blocks(doc).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].name, "a");
    }
}
