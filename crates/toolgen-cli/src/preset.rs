use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use toolgen_core::form::FormPreset;

/// Reads a preset, picking the format from the file extension.
pub fn load_preset(path: &Path) -> Result<FormPreset> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read preset {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let preset = match ext.as_deref() {
        Some("json") => serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse JSON preset {}", path.display()))?,
        Some("yaml" | "yml") => serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse YAML preset {}", path.display()))?,
        Some("toml") => toml::from_str(&raw)
            .with_context(|| format!("Failed to parse TOML preset {}", path.display()))?,
        _ => bail!(
            "Unsupported preset format for {} (expected .json, .yaml, .yml or .toml)",
            path.display()
        ),
    };
    tracing::debug!(path = %path.display(), "loaded preset");
    Ok(preset)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use toolgen_core::form::FormController;
    use toolgen_core::schema::FieldId;
    use toolgen_core::CodeStyle;

    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).expect("write preset");
        path
    }

    fn build(preset: &FormPreset) -> toolgen_core::ToolSpec {
        let mut form = FormController::new();
        form.apply_preset(preset);
        form.validate_and_build().expect("valid preset")
    }

    #[test]
    fn json_preset_uses_wire_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            &dir,
            "tool.json",
            r#"{"toolName":"Csv2Json","description":"Convert CSV","language":"Python",
                "frameworks":["flask"],"inputType":"csv","outputType":"json",
                "includeComments":true,"codeStyle":"verbose"}"#,
        );
        let spec = build(&load_preset(&path).expect("preset"));
        assert_eq!(spec.tool_name, "Csv2Json");
        assert_eq!(spec.language, "python");
        assert!(spec.include_comments);
        assert_eq!(spec.code_style, CodeStyle::Verbose);
    }

    #[test]
    fn yaml_preset_accepts_joined_lists_and_snake_case() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            &dir,
            "tool.yml",
            "tool_name: Scraper\ndescription: Fetch pages\nlanguage: javascript\n\
             frameworks: express, react\ninput_type: text\noutput_type: json\n\
             additional_features: [logging, cli]\ninclude_comments: \"yes\"\n",
        );
        let spec = build(&load_preset(&path).expect("preset"));
        assert_eq!(spec.frameworks, vec!["express".to_string(), "react".to_string()]);
        assert_eq!(
            spec.additional_features,
            vec!["logging".to_string(), "cli".to_string()]
        );
        assert!(spec.include_comments);
    }

    #[test]
    fn toml_preset_fills_only_named_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(&dir, "tool.toml", "language = \"java\"\nframeworks = [\"spring\"]\n");
        let preset = load_preset(&path).expect("preset");

        let mut form = FormController::new();
        form.set_field(FieldId::ToolName, "Kept").expect("scalar");
        form.apply_preset(&preset);
        assert_eq!(form.value(FieldId::ToolName), Some("Kept"));
        assert_eq!(form.value(FieldId::Language), Some("java"));
        assert_eq!(form.set_values(FieldId::Frameworks), ["spring"]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(&dir, "tool.ini", "language=python");
        assert!(load_preset(&path).is_err());
    }

    #[test]
    fn misspelled_key_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(&dir, "tool.json", r#"{"toolName":"Csv2Json","langauge":"python"}"#);
        let err = load_preset(&path).expect_err("typo in key");
        assert!(format!("{err:#}").contains("langauge"), "{err:#}");
    }
}
