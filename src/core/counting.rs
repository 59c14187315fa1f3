use crate::domain::model::JobKind;
use crate::utils::error::Result;
use regex::Regex;

/// Block openers at the two-space indent of an extracted preset table.
pub fn count_indented_blocks(content: &str) -> Result<usize> {
    Ok(Regex::new(r"  '[^']+': \{")?.find_iter(content).count())
}

/// Block openers at any indent and spacing.
pub fn count_named_blocks(content: &str) -> Result<usize> {
    Ok(Regex::new(r"'[\w-]+':\s*\{")?.find_iter(content).count())
}

pub fn count_blocks(kind: JobKind, content: &str) -> Result<usize> {
    match kind {
        JobKind::Augment => count_indented_blocks(content),
        JobKind::Extract => count_named_blocks(content),
    }
}

/// `key:` occurrences that start a line or follow `{` / `,`.
pub fn count_field(content: &str, key: &str) -> Result<usize> {
    let pattern = Regex::new(&format!(
        r"(?m)(?:^|[{{,])[ \t]*{}[ \t]*:",
        regex::escape(key)
    ))?;
    Ok(pattern.find_iter(content).count())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "  'foo': {\n    label: 'Foo',\n  },\n  'bar': {\n    source: 'USER',\n    label: 'Bar'\n  }";

    #[test]
    fn test_counts_blocks() {
        assert_eq!(count_indented_blocks(TABLE).unwrap(), 2);
        assert_eq!(count_named_blocks("'a':{ }, 'b-c':  {}").unwrap(), 2);
    }

    #[test]
    fn test_counts_field_lines_and_inline_fields() {
        assert_eq!(count_field(TABLE, "source").unwrap(), 1);
        assert_eq!(count_field("'a': { source: 'X', label: 'A' }", "source").unwrap(), 1);
        assert_eq!(count_field("    resource: 'x',\n    datasource: 1", "source").unwrap(), 0);
    }
}
