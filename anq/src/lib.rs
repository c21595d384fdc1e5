//! ANQ: Annotation Query language
//!
//! Parses search-field queries such as `s:cell AND NOT k:draft` into an
//! expression tree for the annotation search backend.

pub mod config;
pub mod error;
pub mod query;
pub mod record;

pub use config::Config;
pub use error::{Error, ParseError, Result};
pub use query::{default_grammar, marker_of, parse_query, BiOperator, Grammar, Sexpr, Tag, TagKind, UnOperator};
pub use record::{AnnotationKind, AnnotationRecord};
