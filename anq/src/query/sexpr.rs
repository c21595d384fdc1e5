//! Expression tree produced by the query parser.

use std::fmt;

use serde::Serialize;

use super::marker::marker_of;

/// The kind of annotation content a tag term targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    /// Ontology-backed tag: `s:value`
    Semantic,
    /// Free keyword: `k:value`
    Keyword,
    /// Comment text: `c:value`
    Comment,
    /// Pattern over annotation labels: `r:/pattern/`
    Regex,
}

impl TagKind {
    /// Every tag kind, in grammar order.
    pub const ALL: [TagKind; 4] = [
        TagKind::Semantic,
        TagKind::Keyword,
        TagKind::Comment,
        TagKind::Regex,
    ];
}

/// A tag term: the leaf of every query tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    /// Which annotation content the term targets.
    #[serde(rename = "type")]
    pub kind: TagKind,
    /// Literal value (quotes and regex delimiters stripped).
    pub value: String,
    /// Synonym expansion requested with `+s`; only ever set for semantic tags.
    #[serde(rename = "synonymsFlag", skip_serializing_if = "Option::is_none")]
    synonyms: Option<bool>,
}

impl Tag {
    pub fn semantic(value: impl Into<String>, synonyms: bool) -> Self {
        Self {
            kind: TagKind::Semantic,
            value: value.into(),
            synonyms: Some(synonyms),
        }
    }

    pub fn keyword(value: impl Into<String>) -> Self {
        Self::plain(TagKind::Keyword, value)
    }

    pub fn comment(value: impl Into<String>) -> Self {
        Self::plain(TagKind::Comment, value)
    }

    pub fn regex(value: impl Into<String>) -> Self {
        Self::plain(TagKind::Regex, value)
    }

    /// Build a tag of any kind; `synonyms` is ignored unless `kind` is semantic.
    pub fn of_kind(kind: TagKind, value: impl Into<String>, synonyms: bool) -> Self {
        match kind {
            TagKind::Semantic => Self::semantic(value, synonyms),
            TagKind::Keyword | TagKind::Comment | TagKind::Regex => Self::plain(kind, value),
        }
    }

    fn plain(kind: TagKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            synonyms: None,
        }
    }

    /// Whether the downstream evaluator should expand synonyms.
    pub fn synonyms(&self) -> bool {
        self.synonyms.unwrap_or(false)
    }
}

/// Two-operand boolean combinators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BiOperator {
    And,
    Or,
    Xor,
}

impl BiOperator {
    /// Every binary operator, in the order the grammar tries them.
    pub const ALL: [BiOperator; 3] = [BiOperator::And, BiOperator::Or, BiOperator::Xor];

    /// Canonical (upper-case) keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            BiOperator::And => "AND",
            BiOperator::Or => "OR",
            BiOperator::Xor => "XOR",
        }
    }
}

/// Single-operand combinators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UnOperator {
    Not,
}

impl UnOperator {
    pub fn keyword(self) -> &'static str {
        match self {
            UnOperator::Not => "NOT",
        }
    }
}

/// A parsed query.
///
/// Serializes to the shape consumed by the annotation search backend:
/// tags as `{type, value, synonymsFlag?}`, binary nodes as
/// `{operator, lexpr, rexpr}` and unary nodes as `{operator, expr}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Sexpr {
    Tag(Tag),
    Binary {
        operator: BiOperator,
        #[serde(rename = "lexpr")]
        left: Box<Sexpr>,
        #[serde(rename = "rexpr")]
        right: Box<Sexpr>,
    },
    Unary {
        operator: UnOperator,
        #[serde(rename = "expr")]
        operand: Box<Sexpr>,
    },
}

impl Sexpr {
    pub fn binary(operator: BiOperator, left: Sexpr, right: Sexpr) -> Self {
        Sexpr::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(operand: Sexpr) -> Self {
        Sexpr::Unary {
            operator: UnOperator::Not,
            operand: Box::new(operand),
        }
    }

    /// The tag if this node is a leaf.
    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Sexpr::Tag(tag) => Some(tag),
            Sexpr::Binary { .. } | Sexpr::Unary { .. } => None,
        }
    }

    /// Leaves in depth-first, left-to-right order.
    pub fn tags(&self) -> Vec<&Tag> {
        let mut tags = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Sexpr::Tag(tag) => tags.push(tag),
                Sexpr::Binary { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
                Sexpr::Unary { operand, .. } => stack.push(operand),
            }
        }
        tags
    }

    /// JSON form for handing the tree to the search backend.
    pub fn to_json(&self) -> crate::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Write in operand position, where only tags and groups are accepted.
    fn fmt_atomic(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexpr::Tag(tag) => write!(f, "{}", tag),
            Sexpr::Binary { .. } | Sexpr::Unary { .. } => write!(f, "({})", self),
        }
    }
}

impl From<Tag> for Sexpr {
    fn from(tag: Tag) -> Self {
        Sexpr::Tag(tag)
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", marker_of(*self))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TagKind::Regex => write!(f, "{}:/{}/", self.kind, self.value),
            TagKind::Semantic | TagKind::Keyword | TagKind::Comment => {
                write!(f, "{}:", self.kind)?;
                if !self.value.is_empty() && self.value.chars().all(|c| c.is_ascii_alphanumeric()) {
                    write!(f, "{}", self.value)?;
                } else {
                    write!(f, "\"{}\"", self.value)?;
                }
                if self.synonyms() {
                    write!(f, "+s")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for BiOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl fmt::Display for UnOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Canonical query text; parsing it yields the same tree.
impl fmt::Display for Sexpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexpr::Tag(tag) => write!(f, "{}", tag),
            Sexpr::Binary {
                operator,
                left,
                right,
            } => {
                left.fmt_atomic(f)?;
                write!(f, " {} {}", operator, right)
            }
            Sexpr::Unary { operator, operand } => {
                write!(f, "{} ", operator)?;
                operand.fmt_atomic(f)
            }
        }
    }
}
