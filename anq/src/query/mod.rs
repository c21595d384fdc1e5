//! Annotation query language.
//!
//! # Syntax Overview
//!
//! - **Semantic tags**: `s:cell`, `s:"cell line"`, `s:cell+s` (expand synonyms)
//! - **Keywords**: `k:draft`
//! - **Comments**: `c:"needs review"`
//! - **Regex over labels**: `r:/^cell.*/`
//! - **Operators**: `AND`, `OR`, `XOR` (case-insensitive, right-associative,
//!   equal precedence) and `NOT`, which applies to a single tag or group
//! - **Grouping**: `(k:a OR k:b) AND s:c`
//!
//! `NOT s:a AND k:b` is rejected; write `NOT (s:a AND k:b)` or
//! `(NOT s:a) AND k:b`.

mod grammar;
mod marker;
mod parser;
mod sexpr;

pub use grammar::{default_grammar, parse_query, Grammar};
pub use marker::marker_of;
pub use sexpr::{BiOperator, Sexpr, Tag, TagKind, UnOperator};
