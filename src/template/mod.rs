//! Nunjucks template parser.
//!
//! Turns raw template text into a [`Node`] tree without executing anything.
//! The extractor consumes this tree; syntax errors surface as
//! [`TemplateError`] and are handed to the caller untouched.
//!
//! - `lexer`: splits the source into data and tag tokens
//! - `nodes`: the closed set of tree node kinds
//! - `parser`: recursive-descent parser for tags and expressions

pub mod lexer;
pub mod nodes;
pub mod parser;

use thiserror::Error;

pub use nodes::{Literal, Node, NodeKind};

/// A template that does not conform to the Nunjucks grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (line {line}, column {col})")]
pub struct TemplateError {
    pub message: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub col: usize,
}

impl TemplateError {
    pub fn new(message: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            message: message.into(),
            line,
            col,
        }
    }
}

/// Parse template source into its root node.
pub fn parse_template(source: &str) -> Result<Node, TemplateError> {
    let tokens = lexer::tokenize(source)?;
    parser::Parser::new(&tokens).parse_root()
}
