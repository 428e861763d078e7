//! Message extraction from parsed templates.
//!
//! - `matcher`: decides whether one call node is a translatable message
//! - `walker`: visits the whole tree and feeds matches into a [`Catalog`]

mod matcher;
mod walker;


pub use matcher::{ExtractedMessage, match_call};
pub use walker::walk;

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{Error, SpecError};
use crate::keywords::{KeywordSpec, RawKeywordSpec};
use crate::template::{Node, parse_template};

/// Extracts gettext messages from Nunjucks template source.
///
/// The keyword table is normalized once at construction. Every call to
/// [`Extractor::parse`] starts from an empty catalog, so one extractor can be
/// reused across templates and threads.
///
/// ```
/// use njk_xgettext::Extractor;
///
/// let extractor = Extractor::new();
/// let catalog = extractor
///     .parse("{{ gettext('Hello') }}\n{{ ngettext('%d file', '%d files', n) }}")
///     .unwrap();
/// assert_eq!(catalog.get("Hello").unwrap().line, vec![1]);
/// assert_eq!(catalog.get("%d file").unwrap().plural.as_deref(), Some("%d files"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    keywords: KeywordSpec,
}

impl Extractor {
    /// Extractor using the built-in gettext keyword table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor using only the keywords in `raw`.
    pub fn with_spec(raw: &RawKeywordSpec) -> Result<Self, SpecError> {
        Ok(Self::from_keyword_spec(KeywordSpec::from_raw(raw)?))
    }

    pub fn from_keyword_spec(keywords: KeywordSpec) -> Self {
        Self { keywords }
    }

    pub fn keyword_spec(&self) -> &KeywordSpec {
        &self.keywords
    }

    /// Parse template source and extract its messages.
    ///
    /// Template syntax errors and plural conflicts are returned as errors;
    /// no partial catalog is produced.
    pub fn parse(&self, source: &str) -> Result<Catalog, Error> {
        let root = parse_template(source)?;
        let catalog = self.parse_tree(&root)?;
        debug!(
            messages = catalog.len(),
            occurrences = catalog.occurrence_count(),
            "extraction finished"
        );
        Ok(catalog)
    }

    /// Extract from an already parsed tree.
    pub fn parse_tree(&self, root: &Node) -> Result<Catalog, Error> {
        let mut catalog = Catalog::new();
        walk(root, &self.keywords, &mut catalog)?;
        Ok(catalog)
    }

    /// Same as [`crate::message_to_key`].
    pub fn message_to_key(msgid: &str, msgctxt: Option<&str>) -> String {
        crate::catalog::message_to_key(msgid, msgctxt)
    }
}

impl TryFrom<RawKeywordSpec> for Extractor {
    type Error = SpecError;

    fn try_from(raw: RawKeywordSpec) -> Result<Self, Self::Error> {
        Self::with_spec(&raw)
    }
}

/// One-shot extraction. `None` uses the built-in keyword table.
pub fn extract(source: &str, keywords: Option<&RawKeywordSpec>) -> Result<Catalog, Error> {
    let extractor = match keywords {
        Some(raw) => Extractor::with_spec(raw)?,
        None => Extractor::new(),
    };
    extractor.parse(source)
}
