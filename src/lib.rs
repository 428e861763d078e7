//! njk-xgettext - gettext message extraction for Nunjucks templates
//!
//! Parses templates without rendering them and collects every call to a
//! configured gettext keyword whose message arguments are string literals.
//! Messages are deduplicated into a [`Catalog`] keyed by context and msgid,
//! with every source line they occur on.
//!
//! ```
//! use njk_xgettext::{Extractor, message_to_key};
//!
//! let catalog = Extractor::new()
//!     .parse("{{ pgettext('menu', 'Open') }} {{ _('Open') }}")
//!     .unwrap();
//! assert_eq!(catalog.len(), 2);
//! assert!(catalog.contains_key(&message_to_key("Open", Some("menu"))));
//! ```
//!
//! ## Module Structure
//!
//! - `template`: Nunjucks lexer, node tree and parser
//! - `keywords`: keyword specs and their normalization
//! - `extract`: call matching and tree walking
//! - `catalog`: the deduplicated message catalog
//! - `config`, `scan`, `issues`, `reporter`, `cli`: the command-line tool

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod issues;
pub mod keywords;
pub mod reporter;
pub mod scan;
pub mod template;

pub use catalog::{Catalog, CatalogEntry, message_to_key};
pub use error::{Error, ExtractError, SpecError};
pub use extract::{ExtractedMessage, Extractor, extract};
pub use keywords::{KeywordSpec, RawKeywordSpec, RawRoleSpec, RoleMap};
