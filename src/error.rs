//! Error types for the extraction library.
//!
//! The CLI layer wraps these in `anyhow::Error`; library callers can match
//! on them directly.

use thiserror::Error;

use crate::template::TemplateError;

/// Any failure of [`crate::Extractor::parse`] or [`crate::extract`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The template source is not valid Nunjucks.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// The template parsed, but its messages are inconsistent.
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Spec(#[from] SpecError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// One catalog key was given two different plural forms.
    #[error(
        "mismatched plurals for \"{key}\": \"{existing}\" was already defined, found \"{found}\" on line {line}"
    )]
    PluralMismatch {
        key: String,
        existing: String,
        found: String,
        line: usize,
    },
}

/// A keyword definition that cannot be normalized into role positions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("keyword '{keyword}': expected 1 or 2 argument positions, got {count}")]
    PositionCount { keyword: String, count: usize },
    #[error("keyword '{keyword}': expected exactly 2 role names, got {count}")]
    RoleNameCount { keyword: String, count: usize },
    #[error("keyword '{keyword}': unknown role '{role}'")]
    UnknownRole { keyword: String, role: String },
    #[error("keyword '{keyword}': role '{role}' is given more than once")]
    DuplicateRole { keyword: String, role: String },
    #[error("keyword '{keyword}': no msgid position")]
    MissingMsgid { keyword: String },
    #[error("keyword '{keyword}': several roles share argument position {position}")]
    SharedPosition { keyword: String, position: usize },
    #[error("invalid keyword definition '{0}'")]
    InvalidDefinition(String),
}

impl ExtractError {
    pub fn line(&self) -> usize {
        match self {
            ExtractError::PluralMismatch { line, .. } => *line,
        }
    }
}
