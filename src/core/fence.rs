use crate::utils::error::Result;
use regex::Regex;

/// Body of the first ```` ```<lang> ```` fenced block, without the fences.
pub fn extract_code_block<'a>(content: &'a str, lang: &str) -> Result<Option<&'a str>> {
    let pattern = Regex::new(&format!(r"(?s)```{}\r?\n(.*?)\r?\n```", regex::escape(lang)))?;
    Ok(pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_first_matching_block() {
        let doc = "# Presets\n\n```bash\nnpm run dev\n```\n\n```ts\nexport const a = {}\n```\n\n```ts\nsecond\n```\n";
        assert_eq!(
            extract_code_block(doc, "ts").unwrap(),
            Some("export const a = {}")
        );
    }

    #[test]
    fn test_missing_block() {
        assert_eq!(extract_code_block("no code here", "ts").unwrap(), None);
    }

    #[test]
    fn test_crlf_document() {
        let doc = "```ts\r\nconst x = 1\r\n```\r\n";
        assert_eq!(extract_code_block(doc, "ts").unwrap(), Some("const x = 1"));
    }
}
