//! ngxconf Core Library
//!
//! This crate provides the directive tree for nginx-style configuration
//! files together with the renderer that turns a tree back into text.
//! Parsing lives in `ngxconf-config`.
//!
//! # Example
//!
//! ```rust
//! use ngxconf_core::Node;
//!
//! let mut root = Node::root();
//! let events = root.add("events", &[]);
//! events.add("worker_connections", &["1024"]);
//!
//! assert_eq!(root.to_string(), "events {\n    worker_connections 1024;\n}");
//! ```

pub mod error;
pub mod node;
pub mod render;

pub use error::{Error, Result};
pub use node::Node;

/// ngxconf version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
