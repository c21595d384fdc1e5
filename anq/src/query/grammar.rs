//! Compiled query grammar.
//!
//! ```text
//! query = expr white "AND"i white query
//!       / expr white "OR"i  white query
//!       / expr white "XOR"i white query
//!       / white "NOT"i white expr
//!       / expr
//! expr  = tag / "(" query ")"
//! tag   = "s:" value "+s"? / "k:" value / "c:" value / "r:/" regex "/"
//! value = [a-zA-Z0-9]+ / '"' [^"]+ '"'
//! regex = [a-zA-Z0-9_ ^$*+?.()]+
//! white = [ ]*
//! ```
//!
//! Tag prefixes are derived from `marker_of` so the surface syntax and the
//! marker table cannot disagree.

use std::sync::LazyLock;

use super::marker::marker_of;
use super::parser::Parser;
use super::sexpr::{BiOperator, Sexpr, TagKind, UnOperator};
use crate::{Config, ParseError};

/// Grammar used by `parse_query`, compiled on first use.
static DEFAULT_GRAMMAR: LazyLock<Grammar> = LazyLock::new(|| Grammar::compile(&Config::from_env()));

/// Character classes used as terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharClass {
    /// `[a-zA-Z0-9]`
    Alnum,
    /// `[^"]`
    Unquoted,
    /// `[a-zA-Z0-9_ ^$*+?.()]`
    Regex,
    /// `[ ]`
    Space,
}

impl CharClass {
    pub(crate) fn matches(self, c: char) -> bool {
        match self {
            CharClass::Alnum => c.is_ascii_alphanumeric(),
            CharClass::Unquoted => c != '"',
            CharClass::Regex => {
                c.is_ascii_alphanumeric()
                    || matches!(c, '_' | ' ' | '^' | '$' | '*' | '+' | '?' | '.' | '(' | ')')
            }
            CharClass::Space => c == ' ',
        }
    }

    pub(crate) fn description(self) -> &'static str {
        match self {
            CharClass::Alnum => "[a-zA-Z0-9]",
            CharClass::Unquoted => "[^\"]",
            CharClass::Regex => "[a-zA-Z0-9_ \\^$*+?.()]",
            CharClass::Space => "[ ]",
        }
    }
}

/// How the text after a tag prefix is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TagBody {
    /// A bare or quoted value, optionally followed by a synonyms suffix.
    Value { synonyms_suffix: Option<&'static str> },
    /// A run of `CharClass::Regex` closed by `terminator`.
    Delimited { terminator: &'static str },
}

/// One alternative of the `tag` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TagRule {
    pub kind: TagKind,
    pub prefix: String,
    pub body: TagBody,
}

impl TagRule {
    fn for_kind(kind: TagKind) -> Self {
        let marker = marker_of(kind);
        match kind {
            TagKind::Semantic => Self {
                kind,
                prefix: format!("{}:", marker),
                body: TagBody::Value {
                    synonyms_suffix: Some("+s"),
                },
            },
            TagKind::Keyword | TagKind::Comment => Self {
                kind,
                prefix: format!("{}:", marker),
                body: TagBody::Value {
                    synonyms_suffix: None,
                },
            },
            TagKind::Regex => Self {
                kind,
                prefix: format!("{}:/", marker),
                body: TagBody::Delimited { terminator: "/" },
            },
        }
    }
}

/// An immutable, compiled query grammar.
///
/// Compiling is deterministic: two grammars built from equal configs accept
/// the same language and produce identical trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    pub(crate) tags: Vec<TagRule>,
    pub(crate) operators: Vec<(BiOperator, &'static str)>,
    pub(crate) negation: &'static str,
    pub(crate) open: &'static str,
    pub(crate) close: &'static str,
    pub(crate) quote: &'static str,
    pub(crate) max_depth: usize,
}

impl Grammar {
    /// Build the grammar tables.
    ///
    /// # Panics
    ///
    /// If two tag kinds share a prefix or a prefix does not map back to its
    /// kind. Both are programming errors in the marker table.
    pub fn compile(config: &Config) -> Self {
        let tags: Vec<TagRule> = TagKind::ALL.into_iter().map(TagRule::for_kind).collect();

        for (i, rule) in tags.iter().enumerate() {
            let marker = rule.prefix.split(':').next().unwrap_or_default();
            assert_eq!(
                TagKind::from_marker(marker),
                Some(rule.kind),
                "tag prefix {:?} does not map back to {:?}",
                rule.prefix,
                rule.kind
            );
            assert!(
                tags[..i].iter().all(|other| other.prefix != rule.prefix),
                "duplicate tag prefix {:?}",
                rule.prefix
            );
        }

        let operators = BiOperator::ALL.into_iter().map(|op| (op, op.keyword())).collect();

        log::debug!(
            "compiled query grammar: {} tag rules, max_depth={}",
            tags.len(),
            config.max_depth
        );

        Self {
            tags,
            operators,
            negation: UnOperator::Not.keyword(),
            open: "(",
            close: ")",
            quote: "\"",
            max_depth: config.max_depth,
        }
    }

    /// Nesting limit this grammar enforces.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parse a complete query.
    pub fn parse(&self, input: &str) -> Result<Sexpr, ParseError> {
        log::trace!("parsing query {:?}", input);
        let result = Parser::new(self, input).run();
        if let Err(e) = &result {
            log::debug!("query {:?} rejected at column {}: {}", input, e.location, e.message);
        }
        result
    }
}

/// The process-wide grammar, compiled from `Config::from_env()`.
pub fn default_grammar() -> &'static Grammar {
    &DEFAULT_GRAMMAR
}

/// Parse a query with the process-wide grammar.
pub fn parse_query(input: &str) -> Result<Sexpr, ParseError> {
    DEFAULT_GRAMMAR.parse(input)
}
