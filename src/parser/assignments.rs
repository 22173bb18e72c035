//! Assignments document file parsing.

use anyhow::{Context, Result};
use std::path::Path;

use crate::models::Assignments;

/// Loads an assignments document from a JSON file.
///
/// # Errors
///
/// Returns errors for a missing file, unreadable content, or JSON that does
/// not match the `{code: {scope: [description, tags]}}` shape.
pub fn load_assignments_file(path: &Path) -> Result<Assignments> {
    if !path.is_file() {
        anyhow::bail!(
            "Assignments file not found: {}\n\n\
             Please provide a path to a JSON assignments document.",
            path.display()
        );
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read assignments file: {}", path.display()))?;

    parse_assignments_str(&content)
        .with_context(|| format!("Failed to parse assignments file: {}", path.display()))
}

/// Parses an assignments document from a JSON string.
pub fn parse_assignments_str(content: &str) -> Result<Assignments> {
    let assignments: Assignments =
        serde_json::from_str(content).context("Assignments document has an invalid shape")?;
    Ok(assignments)
}
