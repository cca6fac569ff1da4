//! JSON adapter
//!
//! Mirrors the directive tree as JSON, e.g.
//! `{"root":true,"children":[{"directive":"gzip","args":["on"]}]}`.

use ngxconf_core::{Error as NodeError, Node};
use thiserror::Error;

/// JSON adapter errors
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid tree: {0}")]
    Tree(#[from] NodeError),
}

/// JSON configuration adapter
pub struct JsonAdapter;

impl JsonAdapter {
    /// Parse a JSON tree, checking the node invariants
    pub fn parse(input: &str) -> Result<Node, AdapterError> {
        let node: Node = serde_json::from_str(input)?;
        node.validate()?;
        Ok(node)
    }

    /// Serialize a tree to pretty-printed JSON
    pub fn serialize(node: &Node) -> Result<String, AdapterError> {
        Ok(serde_json::to_string_pretty(node)?)
    }
}
