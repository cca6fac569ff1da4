//! Configuration parser
//!
//! Single left-to-right pass over the token stream. Open blocks live on an
//! explicit stack; the word and statement being built are the only other
//! state.

use crate::parser::lexer::{tokenize, LexError, Location, Spanned, Token};
use ngxconf_core::{Error as NodeError, Node};
use std::mem;
use thiserror::Error;

/// Parser error types
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Lexer error: {0}")]
    Lex(#[from] LexError),

    #[error("Invalid node at position {position}: {source}")]
    InvalidNode {
        position: usize,
        #[source]
        source: NodeError,
    },

    #[error("Unbalanced `}}` at position {position}: no block is open")]
    UnbalancedBlock { position: usize },

    #[error("Block `{directive}` opened at position {position} is never closed")]
    UnclosedBlock { directive: String, position: usize },
}

impl ParseError {
    /// Byte offset in the source the error points at
    pub fn position(&self) -> usize {
        match self {
            ParseError::Lex(LexError::UnexpectedChar { position }) => *position,
            ParseError::InvalidNode { position, .. }
            | ParseError::UnbalancedBlock { position }
            | ParseError::UnclosedBlock { position, .. } => *position,
        }
    }
}

type ParseResult<T> = Result<T, ParseError>;

/// A block under construction and where it was opened
struct Frame {
    node: Node,
    span: Location,
}

/// Parser state
pub struct Parser {
    tokens: Vec<Spanned<Token>>,
    stack: Vec<Frame>,
    current: Frame,
    word: String,
    statement: Vec<String>,
}

impl Parser {
    /// Create a new parser from source code
    pub fn new(source: &str) -> ParseResult<Self> {
        let tokens = tokenize(source)?;
        Ok(Self {
            tokens,
            stack: Vec::new(),
            current: Frame {
                node: Node::root(),
                span: Location { start: 0, end: 0 },
            },
            word: String::new(),
            statement: Vec::new(),
        })
    }

    /// Parse the whole source into a document root
    pub fn parse(mut self) -> ParseResult<Node> {
        let tokens = mem::take(&mut self.tokens);
        let end = tokens.last().map_or(0, |t| t.span.end);

        for Spanned { value, span } in tokens {
            match value {
                Token::Whitespace => self.close_word(),
                Token::Word(word) => self.word.push_str(&word),
                Token::Comment(text) => self.comment(&text, span)?,
                Token::Semicolon => {
                    self.close_word();
                    self.finish_statement(span)?;
                }
                Token::BlockOpen => self.open_block(span)?,
                Token::BlockClose => self.close_block(span)?,
            }
        }

        self.close_word();
        self.finish_statement(Location { start: end, end })?;

        if !self.stack.is_empty() {
            return Err(ParseError::UnclosedBlock {
                directive: self.current.node.directive().to_string(),
                position: self.current.span.start,
            });
        }

        tracing::debug!(
            "parsed {} top-level node(s)",
            self.current.node.children().len()
        );
        Ok(self.current.node)
    }

    /// Move the open word into the statement.
    fn close_word(&mut self) {
        if !self.word.is_empty() {
            self.statement.push(mem::take(&mut self.word));
        }
    }

    /// A comment is split on single spaces and tabs, empty pieces
    /// included, and becomes a node of its own. A statement still open
    /// when the comment starts is finished first, as if `;` preceded it.
    fn comment(&mut self, text: &str, span: Location) -> ParseResult<()> {
        self.close_word();
        self.finish_statement(span)?;

        for piece in text.split(|c: char| c == ' ' || c == '\t') {
            self.statement.push(piece.to_string());
        }

        self.finish_statement(span)
    }

    /// Turn a non-empty statement into a child of the current block.
    fn finish_statement(&mut self, span: Location) -> ParseResult<()> {
        if self.statement.is_empty() {
            return Ok(());
        }

        let statement = mem::take(&mut self.statement);
        let node = Node::new(statement, false).map_err(|source| ParseError::InvalidNode {
            position: span.start,
            source,
        })?;
        self.attach(node, span)
    }

    fn open_block(&mut self, span: Location) -> ParseResult<()> {
        self.close_word();

        let statement = mem::take(&mut self.statement);
        let node = Node::new(statement, false).map_err(|source| ParseError::InvalidNode {
            position: span.start,
            source,
        })?;

        tracing::trace!("open block `{}` at {}", node.directive(), span.start);
        let parent = mem::replace(&mut self.current, Frame { node, span });
        self.stack.push(parent);
        Ok(())
    }

    fn close_block(&mut self, span: Location) -> ParseResult<()> {
        // `a { b }` keeps `b` as a child of `a`, as end of input would.
        self.close_word();
        self.finish_statement(span)?;

        let parent = self
            .stack
            .pop()
            .ok_or(ParseError::UnbalancedBlock { position: span.start })?;
        let inner = mem::replace(&mut self.current, parent);

        tracing::trace!("close block `{}` at {}", inner.node.directive(), span.start);
        self.attach(inner.node, inner.span)
    }

    fn attach(&mut self, node: Node, span: Location) -> ParseResult<()> {
        self.current
            .node
            .push_child(node)
            .map_err(|source| ParseError::InvalidNode {
                position: span.start,
                source,
            })
    }
}

/// Parse configuration source into a document root
pub fn parse(source: &str) -> ParseResult<Node> {
    Parser::new(source)?.parse()
}
