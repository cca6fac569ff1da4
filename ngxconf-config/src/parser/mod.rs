//! Parser module for nginx-style configuration
//!
//! This module provides the lexer and the parser that builds a
//! [`Node`](ngxconf_core::Node) tree.

pub mod lexer;
pub mod parser;

pub use lexer::{tokenize, LexError, Location, Spanned, Token};
pub use parser::{parse, ParseError, Parser};
