//! Error types for ngxconf

use thiserror::Error;

/// Result type for tree operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the directive tree
#[derive(Error, Debug)]
pub enum Error {
    /// The document root was given a directive name
    #[error("root node must not have a directive, found `{0}`")]
    RootDirective(String),

    /// A directive or block was built without a name
    #[error("non-root node has no directive")]
    NonRootMissingDirective,

    /// A root node was attached below another node
    #[error("root node cannot be the child of another node")]
    NestedRoot,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
