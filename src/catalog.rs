//! Deduplicated message catalog built during extraction.
//!
//! Entries are keyed by [`message_to_key`]: the msgid alone, or the context
//! and msgid joined by the gettext EOT separator. Each occurrence of a
//! message appends its source line to the entry.

use std::collections::{BTreeMap, btree_map};

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;
use crate::extract::ExtractedMessage;

/// Separator between context and msgid in catalog keys (same as in MO files).
pub const CONTEXT_SEPARATOR: char = '\u{4}';

/// Catalog key for a message. An empty context counts as no context.
///
/// ```
/// use njk_xgettext::message_to_key;
///
/// assert_eq!(message_to_key("file", None), "file");
/// assert_ne!(
///     message_to_key("file", Some("menu")),
///     message_to_key("file", Some("toolbar")),
/// );
/// ```
pub fn message_to_key(msgid: &str, msgctxt: Option<&str>) -> String {
    match msgctxt {
        Some(ctx) if !ctx.is_empty() => format!("{ctx}{CONTEXT_SEPARATOR}{msgid}"),
        _ => msgid.to_string(),
    }
}

/// One extracted message and every line it occurs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub msgid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msgid_plural: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msgctxt: Option<String>,
    /// Plural display form; same as `msgid_plural` when one was extracted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    /// Source line (1-indexed) of each occurrence, in traversal order.
    pub line: Vec<usize>,
}

impl CatalogEntry {
    fn from_message(message: ExtractedMessage) -> Self {
        Self {
            msgid: message.msgid,
            plural: message.msgid_plural.clone(),
            msgid_plural: message.msgid_plural,
            msgctxt: message.msgctxt,
            line: vec![message.line],
        }
    }

    pub fn key(&self) -> String {
        message_to_key(&self.msgid, self.msgctxt.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as the free function [`message_to_key`].
    pub fn message_to_key(msgid: &str, msgctxt: Option<&str>) -> String {
        message_to_key(msgid, msgctxt)
    }

    /// Add one occurrence of a message.
    ///
    /// A key keeps the first plural form it is given. A later occurrence
    /// with a different plural is an error and leaves the catalog untouched.
    pub fn merge(&mut self, message: ExtractedMessage) -> Result<(), ExtractError> {
        let key = message_to_key(&message.msgid, message.msgctxt.as_deref());
        let Some(entry) = self.entries.get_mut(&key) else {
            self.entries
                .insert(key, CatalogEntry::from_message(message));
            return Ok(());
        };

        match (&entry.msgid_plural, message.msgid_plural) {
            (Some(existing), Some(found)) if *existing != found => {
                return Err(ExtractError::PluralMismatch {
                    key,
                    existing: existing.clone(),
                    found,
                    line: message.line,
                });
            }
            (None, Some(found)) => {
                entry.plural = Some(found.clone());
                entry.msgid_plural = Some(found);
            }
            _ => {}
        }
        entry.line.push(message.line);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    /// Look up by msgid and context instead of by key.
    pub fn get_message(&self, msgid: &str, msgctxt: Option<&str>) -> Option<&CatalogEntry> {
        self.entries.get(&message_to_key(msgid, msgctxt))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total occurrences across all entries.
    pub fn occurrence_count(&self) -> usize {
        self.entries.values().map(|e| e.line.len()).sum()
    }

    pub fn into_entries(self) -> BTreeMap<String, CatalogEntry> {
        self.entries
    }
}

impl IntoIterator for Catalog {
    type Item = (String, CatalogEntry);
    type IntoIter = btree_map::IntoIter<String, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = (&'a String, &'a CatalogEntry);
    type IntoIter = btree_map::Iter<'a, String, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
