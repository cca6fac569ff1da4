//! ngxconf Configuration Parser
//!
//! This crate parses nginx-style configuration text into the
//! [`Node`] tree from `ngxconf-core`.
//!
//! # Example
//!
//! ```rust
//! use ngxconf_config::parse;
//!
//! let source = "
//!     events {
//!         worker_connections 1024;
//!     }
//!     http {
//!         sendfile on;
//!     }
//! ";
//!
//! let mut root = parse(source).unwrap();
//! root.del("events", &[]);
//! assert_eq!(root.to_string(), "http {\n    sendfile on;\n}");
//! ```

pub mod adapter;
pub mod parser;
pub mod query;

pub use adapter::{AdapterError, JsonAdapter};
pub use ngxconf_core::Node;
pub use parser::{parse, tokenize, LexError, ParseError, Parser, Token};
pub use query::{Selector, SelectorError, Step};

use std::path::Path;

/// Read and parse a configuration file
pub fn parse_file(path: impl AsRef<Path>) -> Result<Node, LoadError> {
    let path = path.as_ref();
    tracing::debug!("loading {}", path.display());

    let source = std::fs::read_to_string(path)?;
    Ok(parse(&source)?)
}

/// Error loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}
