use anyhow::Result;
use preset_source::app::{run_audit, run_extract};
use preset_source::{PresetError, Strategy, TomlConfig};
use std::path::Path;
use tempfile::TempDir;

const PRESETS_MD: &str = "# Theme presets

The built-in presets shipped with the app.

```ts
import { ThemePreset } from '../types/theme'

export const defaultPresets: Record<string, ThemePreset> = {
  'ocean': {
    label: 'Ocean',
    colors: { primary: '#00aaff' },
  },
  'sunset': {
    source: 'BUILT_IN',
    label: 'Sunset',
  },
  'mono': { label: 'Mono' },
}
```
";

fn setup(doc: &str) -> Result<TempDir> {
    let dir = TempDir::new()?;
    std::fs::create_dir_all(dir.path().join("docs"))?;
    std::fs::write(dir.path().join("docs/PRESETS.md"), doc)?;
    Ok(dir)
}

fn read(root: &Path, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(root.join(path))?)
}

#[test]
fn test_extract_rewrites_and_injects() -> Result<()> {
    let dir = setup(PRESETS_MD)?;

    let report = run_extract(TomlConfig::default(), dir.path(), false)?;

    assert_eq!(report.blocks_after, 3);
    assert_eq!(report.inserted, 2);
    assert_eq!(report.rewrites_applied, 2);
    assert_eq!(
        report.summary_lines(),
        vec![
            "✅ Successfully extracted 3 presets".to_string(),
            "   File: app/config/presets.ts".to_string(),
        ]
    );

    let output = read(dir.path(), "app/config/presets.ts")?;
    assert!(output.contains("import type { ThemePreset, ThemePresets } from '~/types/theme'"));
    assert!(output.contains("export const defaultPresets: ThemePresets = {"));
    assert!(!output.contains("Record<string, ThemePreset>"));
    assert!(output.contains("  'ocean': {\n    source: 'BUILT_IN',\n    label: 'Ocean',"));
    assert!(output.contains("  'sunset': {\n    source: 'BUILT_IN',\n    label: 'Sunset',\n  },"));
    assert!(output.contains("  'mono': { source: 'BUILT_IN', label: 'Mono' },"));
    Ok(())
}

#[test]
fn test_input_document_is_never_modified() -> Result<()> {
    let dir = setup(PRESETS_MD)?;

    run_extract(TomlConfig::default(), dir.path(), false)?;
    run_extract(TomlConfig::default(), dir.path(), false)?;

    assert_eq!(read(dir.path(), "docs/PRESETS.md")?, PRESETS_MD);
    Ok(())
}

#[test]
fn test_every_extracted_preset_has_one_source() -> Result<()> {
    let dir = setup(PRESETS_MD)?;

    run_extract(TomlConfig::default(), dir.path(), false)?;
    let audit = run_audit(
        &TomlConfig::default(),
        dir.path(),
        Some("app/config/presets.ts"),
    )?;

    assert_eq!(audit.blocks, 3);
    assert!(audit.is_complete());
    Ok(())
}

#[test]
fn test_code_fence_extracts_only_the_table() -> Result<()> {
    let dir = setup(PRESETS_MD)?;
    let mut config = TomlConfig::default();
    config.override_extract(None, None, Some("ts".to_string()), None);

    run_extract(config, dir.path(), false)?;

    let output = read(dir.path(), "app/config/presets.ts")?;
    assert!(output.starts_with("import type { ThemePreset, ThemePresets } from '~/types/theme'\n"));
    assert!(output.ends_with("  'mono': { source: 'BUILT_IN', label: 'Mono' },\n}"));
    assert!(!output.contains("# Theme presets"));
    Ok(())
}

#[test]
fn test_missing_code_fence_is_an_error() -> Result<()> {
    let dir = setup(PRESETS_MD)?;
    let mut config = TomlConfig::default();
    config.override_extract(None, None, Some("tsx".to_string()), None);

    let err = run_extract(config, dir.path(), false).unwrap_err();

    assert!(matches!(err, PresetError::CodeBlockNotFound { .. }));
    assert!(!dir.path().join("app/config/presets.ts").exists());
    Ok(())
}

#[test]
fn test_nested_braces_before_label_need_structural_strategy() -> Result<()> {
    let doc = "export const defaultPresets: Record<string, ThemePreset> = {\n  'deep': {\n    colors: { primary: '#000' },\n    label: 'Deep',\n  },\n}\n";
    let dir = setup(doc)?;

    let report = run_extract(TomlConfig::default(), dir.path(), false)?;
    assert_eq!(report.inserted, 0);
    let audit = run_audit(
        &TomlConfig::default(),
        dir.path(),
        Some("app/config/presets.ts"),
    )?;
    assert_eq!(audit.missing, vec!["deep".to_string()]);

    let mut config = TomlConfig::default();
    config.override_extract(None, None, None, Some(Strategy::Structural));
    let report = run_extract(config, dir.path(), false)?;
    assert_eq!(report.inserted, 1);
    let audit = run_audit(
        &TomlConfig::default(),
        dir.path(),
        Some("app/config/presets.ts"),
    )?;
    assert!(audit.is_complete());
    Ok(())
}

#[test]
fn test_output_must_differ_from_input() -> Result<()> {
    let dir = setup(PRESETS_MD)?;
    let mut config = TomlConfig::default();
    config.override_extract(None, Some("./docs/PRESETS.md".to_string()), None, None);

    let err = run_extract(config, dir.path(), false).unwrap_err();

    assert!(matches!(err, PresetError::ConfigValidationError { .. }));
    assert_eq!(read(dir.path(), "docs/PRESETS.md")?, PRESETS_MD);
    Ok(())
}

#[test]
fn test_rewrite_table_from_config_file() -> Result<()> {
    let dir = setup(PRESETS_MD)?;
    std::fs::write(
        dir.path().join("preset-source.toml"),
        r#"
[extract]
output = "src/presets.ts"

[[extract.rewrites]]
from = "Record<string, ThemePreset>"
to = "PresetTable"
"#,
    )?;
    let config = TomlConfig::discover(dir.path(), None)?;

    let report = run_extract(config, dir.path(), false)?;

    assert_eq!(report.rewrites_applied, 1);
    let output = read(dir.path(), "src/presets.ts")?;
    assert!(output.contains("import { ThemePreset } from '../types/theme'"));
    assert!(output.contains("export const defaultPresets: PresetTable = {"));
    Ok(())
}

#[test]
fn test_existing_source_after_label_is_preserved() -> Result<()> {
    let doc = "export const defaultPresets: Record<string, ThemePreset> = {\n  'bar': { label: 'Bar', source: 'USER' },\n  'baz': { label: 'Baz' },\n}\n";
    let dir = setup(doc)?;

    let report = run_extract(TomlConfig::default(), dir.path(), false)?;

    assert_eq!(report.inserted, 1);
    let output = read(dir.path(), "app/config/presets.ts")?;
    assert!(output.contains("  'bar': { label: 'Bar', source: 'USER' },"));
    assert!(output.contains("  'baz': { source: 'BUILT_IN', label: 'Baz' },"));
    Ok(())
}
