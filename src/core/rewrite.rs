use crate::domain::model::Rewrite;

/// Applies each pair once over the whole text, in table order, replacing
/// every occurrence. Returns the text and how many pairs matched.
pub fn apply_rewrites(content: &str, rewrites: &[Rewrite]) -> (String, usize) {
    let mut output = content.to_string();
    let mut applied = 0;

    for rewrite in rewrites {
        let hits = output.matches(rewrite.from.as_str()).count();
        if hits == 0 {
            tracing::warn!("Rewrite not applied, text not found: {}", rewrite.from);
            continue;
        }
        tracing::debug!("Rewriting {} occurrence(s) of {:?}", hits, rewrite.from);
        output = output.replace(&rewrite.from, &rewrite.to);
        applied += 1;
    }

    (output, applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_defaults() {
        let input = "import { ThemePreset } from '../types/theme'\n\nexport const defaultPresets: Record<string, ThemePreset> = {}\n";
        let (output, applied) = apply_rewrites(input, &Rewrite::theme_defaults());
        assert_eq!(applied, 2);
        assert_eq!(
            output,
            "import type { ThemePreset, ThemePresets } from '~/types/theme'\n\nexport const defaultPresets: ThemePresets = {}\n"
        );
    }

    #[test]
    fn test_missing_pattern_is_skipped() {
        let (output, applied) = apply_rewrites("const a = 1\n", &Rewrite::theme_defaults());
        assert_eq!(applied, 0);
        assert_eq!(output, "const a = 1\n");
    }

    #[test]
    fn test_later_pairs_see_earlier_output() {
        let rewrites = vec![Rewrite::new("a", "b"), Rewrite::new("b", "c")];
        let (output, applied) = apply_rewrites("a", &rewrites);
        assert_eq!((output.as_str(), applied), ("c", 2));
    }
}
