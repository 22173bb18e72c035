//! Layout document file parsing.

use anyhow::{Context, Result};
use std::path::Path;

use crate::constants::APP_BINARY_NAME;
use crate::models::LayoutDocument;

/// Loads a layout document from a JSON file.
///
/// # Errors
///
/// Returns errors for a missing file, a non-file path, unreadable content,
/// or JSON that does not match the document shape. A failed load must abort
/// startup: the core never compiles without valid assets.
pub fn load_layout_file(path: &Path) -> Result<LayoutDocument> {
    if !path.exists() {
        anyhow::bail!(
            "Layout file not found: {}\n\n\
             Please check the file path and try again.\n\
             Example: {} sample/layout-us-ansi.json --assignments sample/assignments.json",
            path.display(),
            APP_BINARY_NAME
        );
    }

    if !path.is_file() {
        anyhow::bail!(
            "Path is not a file: {}\n\n\
             Please provide a path to a JSON layout document.",
            path.display()
        );
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout file: {}", path.display()))?;

    parse_layout_str(&content)
        .with_context(|| format!("Failed to parse layout file: {}", path.display()))
}

/// Parses a layout document from a JSON string.
pub fn parse_layout_str(content: &str) -> Result<LayoutDocument> {
    let doc: LayoutDocument =
        serde_json::from_str(content).context("Layout document has an invalid shape")?;
    Ok(doc)
}

/// Derives the stable layout key for a document path: the file stem.
///
/// The key identifies the layout in the selection control and in switch
/// operations; display names are resolved separately per language.
#[must_use]
pub fn layout_key_for_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r#"{
        "layout": {
            "name": {"en_US": "Minimal"},
            "partMargin": 0.5,
            "fun": [27],
            "main": [[65]],
            "right": []
        },
        "mappings": {"27": ["Esc"], "65": ["A"]}
    }"#;

    #[test]
    fn test_parse_layout_str() {
        let doc = parse_layout_str(MINIMAL).unwrap();
        assert_eq!(doc.layout.fun.len(), 1);
        assert_eq!(doc.mapping(65).unwrap().label, "A");
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(parse_layout_str(r#"{"layout": {}}"#).is_err());
        assert!(parse_layout_str("[]").is_err());
    }

    #[test]
    fn test_load_layout_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();
        let doc = load_layout_file(file.path()).unwrap();
        assert_eq!(doc.mapping(27).unwrap().label, "Esc");
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_layout_file(Path::new("/nonexistent/layout.json")).unwrap_err();
        assert!(err.to_string().contains("Layout file not found"));
    }

    #[test]
    fn test_layout_key_for_path() {
        assert_eq!(
            layout_key_for_path(Path::new("sample/layout-de-iso.json")),
            "layout-de-iso"
        );
    }
}
