//! Lexer for nginx-style configuration
//!
//! Key features:
//! - Words are any run of characters other than whitespace, `{`, `}`, `;`, `#`
//! - { } for blocks, ; ends a statement
//! - # starts a comment that runs to the end of the line
//! - No quoting: `"msie6"` is a word like any other

use logos::{Logos, Span};
use std::fmt;

/// Source location for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub start: usize,
    pub end: usize,
}

impl From<Span> for Location {
    fn from(span: Span) -> Self {
        Self {
            start: span.start,
            end: span.end,
        }
    }
}

/// A token with its location in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Location,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: impl Into<Location>) -> Self {
        Self {
            value,
            span: span.into(),
        }
    }
}

/// Token types
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    /// Kept as a token: it is what separates words.
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    /// `#` up to, not including, the newline. A trailing CR is dropped.
    #[regex(r"#[^\n]*", |lex| lex.slice().trim_end_matches('\r').to_string())]
    Comment(String),

    // ============================================================
    // Structural
    // ============================================================
    #[token("{")]
    BlockOpen,

    #[token("}")]
    BlockClose,

    #[token(";")]
    Semicolon,

    // ============================================================
    // Values
    // ============================================================
    #[regex(r"[^ \t\r\n{};#]+", |lex| lex.slice().to_string())]
    Word(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Whitespace => write!(f, "whitespace"),
            Token::Comment(s) => write!(f, "{}", s),
            Token::BlockOpen => write!(f, "{{"),
            Token::BlockClose => write!(f, "}}"),
            Token::Semicolon => write!(f, ";"),
            Token::Word(s) => write!(f, "{}", s),
        }
    }
}

/// Lexer result type
pub type LexResult = Result<Vec<Spanned<Token>>, LexError>;

/// Lexer error
#[derive(Debug, Clone, thiserror::Error)]
pub enum LexError {
    #[error("Unexpected character at position {position}")]
    UnexpectedChar { position: usize },
}

/// Tokenize a configuration source string
pub fn tokenize(source: &str) -> LexResult {
    let lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    for (result, span) in lexer.spanned() {
        match result {
            Ok(token) => tokens.push(Spanned::new(token, span)),
            // Every character belongs to some token class, so this only
            // fires if the token set above changes.
            Err(_) => return Err(LexError::UnexpectedChar { position: span.start }),
        }
    }

    Ok(tokens)
}
