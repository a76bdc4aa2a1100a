//! Template model for wikitext documents.
//!
//! This crate is deliberately not a general wikitext parser. It
//! recognizes exactly what the banner sync engine needs: template
//! invocations (`{{name|key=value|...}}`) with nesting, and plain text
//! around them. Everything it does not understand is preserved verbatim
//! as text.
//!
//! # Round-trip identity
//!
//! The one hard guarantee: serializing an unmodified parse reproduces
//! the input byte for byte. Parameter keys and values keep their raw
//! text (including surrounding whitespace), unterminated `{{` stays
//! plain text, and malformed markup is never "repaired". The change
//! decision at the end of the sync pipeline compares serialized output
//! against the original page text, so any parser-introduced drift would
//! show up as a spurious edit.
//!
//! # Key Types
//!
//! - [`Document`] — ordered sequence of [`Node`]s for one page revision
//! - [`Template`] — one invocation: raw name plus ordered parameters
//! - [`Param`] — a named or positional parameter with raw key/value text

mod document;
mod parser;
mod template;

pub use document::{Document, Node};
pub use template::{Param, Template};
