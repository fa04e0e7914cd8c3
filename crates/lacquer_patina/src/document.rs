//! Serialized template documents.
//!
//! A document is a JSON-encoded [`RootNode`] written by an external Angular
//! template parser: the template source plus its node tree.

use crate::error::{LintError, LintResultOf};
use lacquer_relief::ast::RootNode;
use std::path::Path;

/// File suffix of serialized template documents
pub const DOCUMENT_SUFFIX: &str = ".ast.json";

/// Decode a document from JSON text
pub fn parse_document(json: &str) -> Result<RootNode, serde_json::Error> {
    serde_json::from_str(json)
}

/// Read and decode a document from disk
pub fn load_document(path: &Path) -> LintResultOf<RootNode> {
    let content = std::fs::read_to_string(path).map_err(|source| LintError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&content).map_err(|source| LintError::Document {
        path: path.to_path_buf(),
        source,
    })
}
