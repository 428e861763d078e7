//! Problems found while extracting a project's templates.
//!
//! Each issue carries everything the reporter needs to print it; nothing
//! here touches the filesystem.

use std::{cmp::Ordering, fmt};

use enum_dispatch::enum_dispatch;

use crate::error::{Error, ExtractError, SpecError};

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    SyntaxError,
    PluralMismatch,
    ReadError,
    InvalidKeywords,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::SyntaxError => write!(f, "syntax-error"),
            Rule::PluralMismatch => write!(f, "plural-mismatch"),
            Rule::ReadError => write!(f, "read-error"),
            Rule::InvalidKeywords => write!(f, "invalid-keywords"),
        }
    }
}

/// A position inside a template, with the text of that line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
    pub source_line: Option<String>,
}

impl SourceContext {
    /// `line` and `col` are 1-based; `source` is the whole template.
    pub fn new(file_path: &str, source: &str, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.to_string(),
            line,
            col,
            source_line: line
                .checked_sub(1)
                .and_then(|idx| source.lines().nth(idx))
                .map(str::to_string),
        }
    }
}

/// Template text that does not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorIssue {
    pub context: SourceContext,
    pub message: String,
}

/// The same catalog key with two different plural forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralMismatchIssue {
    pub context: SourceContext,
    pub key: String,
    pub existing: String,
    pub found: String,
}

/// A template that could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadErrorIssue {
    pub file_path: String,
    pub error: String,
}

/// A keyword table rejected while extracting `file_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidKeywordsIssue {
    pub file_path: String,
    pub error: SpecError,
}

/// A problem found in one template.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    SyntaxError(SyntaxErrorIssue),
    PluralMismatch(PluralMismatchIssue),
    ReadError(ReadErrorIssue),
    InvalidKeywords(InvalidKeywordsIssue),
}

impl Issue {
    /// Convert an extraction failure on `file_path` into an issue.
    ///
    /// `Extractor::parse` only fails with template or plural errors;
    /// `Error::Spec` comes from the one-shot `extract` with an invalid table.
    pub fn from_error(file_path: &str, source: &str, error: &Error) -> Self {
        match error {
            Error::Template(err) => SyntaxErrorIssue {
                context: SourceContext::new(file_path, source, err.line, err.col),
                message: err.message.clone(),
            }
            .into(),
            Error::Extract(ExtractError::PluralMismatch {
                key,
                existing,
                found,
                line,
            }) => PluralMismatchIssue {
                context: SourceContext::new(file_path, source, *line, 1),
                key: key.clone(),
                existing: existing.clone(),
                found: found.clone(),
            }
            .into(),
            Error::Spec(err) => InvalidKeywordsIssue {
                file_path: file_path.to_string(),
                error: err.clone(),
            }
            .into(),
        }
    }

    pub fn file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Source(ctx) => &ctx.file_path,
            ReportLocation::File { path } => path,
        }
    }

    fn sort_position(&self) -> (usize, usize) {
        match self.location() {
            ReportLocation::Source(ctx) => (ctx.line, ctx.col),
            ReportLocation::File { .. } => (0, 0),
        }
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordered by file, then position, then rule.
impl Ord for Issue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.file_path()
            .cmp(other.file_path())
            .then_with(|| self.sort_position().cmp(&other.sort_position()))
            .then_with(|| self.report_rule().cmp(&other.report_rule()))
    }
}

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A line in a template (has source_line for context display).
    Source(&'a SourceContext),
    /// File-level only.
    File { path: &'a str },
}

/// Everything the reporter needs from an issue.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for SyntaxErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn report_rule(&self) -> Rule {
        Rule::SyntaxError
    }
}

impl Report for PluralMismatchIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_rule(&self) -> Rule {
        Rule::PluralMismatch
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "plural \"{}\" conflicts with earlier \"{}\"",
            self.found, self.existing
        ))
    }

    fn hint(&self) -> Option<&str> {
        Some("use one plural form per msgid, or add a context")
    }
}

impl Report for ReadErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_rule(&self) -> Rule {
        Rule::ReadError
    }
}

impl Report for InvalidKeywordsIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.to_string()
    }

    fn report_rule(&self) -> Rule {
        Rule::InvalidKeywords
    }

    fn hint(&self) -> Option<&str> {
        Some("check the \"keywords\" table or --keyword definitions")
    }
}
