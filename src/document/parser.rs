//! YAML parsing into generic value trees.
//!
//! This is the boundary between text and structure: `parse_document` wraps
//! `serde_yaml` with context, and `parse_lines` implements the line-wise
//! projection used by `..`-prefixed paths, where each non-empty line of the
//! input is parsed as an independent document.

use anyhow::{Context, Result};
use serde_yaml::Value;

/// Parses a YAML string into a generic value tree.
///
/// # Errors
///
/// Returns an error when the input is not a single well-formed YAML
/// document. Query-path callers convert the error into an empty result;
/// the error itself is only surfaced by app-level code.
///
/// # Example
///
/// ```
/// use yamlsift::document::parser::parse_document;
///
/// let tree = parse_document("name: Alice").unwrap();
/// assert!(tree.is_mapping());
/// assert!(parse_document("a: [unclosed").is_err());
/// ```
pub fn parse_document(text: &str) -> Result<Value> {
    serde_yaml::from_str(text).context("failed to parse YAML document")
}

/// Parses each non-empty line of `text` as an independent YAML document.
///
/// Lines are trimmed before parsing; blank lines and lines that fail to
/// parse are skipped. This backs the `..` lines-mode prefix, which treats
/// JSON-lines style input as a flat array.
pub fn parse_lines(text: &str) -> Vec<Value> {
    let mut docs = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Ok(value) = serde_yaml::from_str(line) {
            docs.push(value);
        }
    }
    docs
}
