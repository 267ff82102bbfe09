//! The document instruction model.
//!
//! A document is a tree of [`Element`]s checked against a declarative schema
//! before anything renders it. Strict entry points ([`parse_document`],
//! [`validate_document`], [`validate_element`]) report the first violation
//! with its JSON path; [`load_content_lenient`] keeps going and swaps bad
//! elements for placeholders.

pub mod defaults;
pub mod document;
pub mod element;
pub mod error;
pub mod ops;
pub mod path;
pub mod schema;
pub mod validate;

pub use defaults::default_element;
pub use document::{Document, Footer, Header, Metadata, PageSettings};
pub use element::*;
pub use error::{EditError, ValidationError};
pub use validate::{load_content_lenient, parse_document, validate_document, validate_element};
