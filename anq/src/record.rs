//! Annotation vocabulary shared with query evaluators.
//!
//! The parser never touches annotation records. These types pin down what an
//! evaluator needs from a record so it can interpret a `Sexpr`.

use serde::{Deserialize, Serialize};

use crate::TagKind;

/// Classification of a stored annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Semantic,
    Keyword,
    Comment,
    /// Subject/predicate/object statement. No query term targets triples.
    Triple,
}

impl AnnotationKind {
    /// Whether any tag kind can match annotations of this kind.
    pub fn is_queryable(self) -> bool {
        match self {
            AnnotationKind::Semantic | AnnotationKind::Keyword | AnnotationKind::Comment => true,
            AnnotationKind::Triple => false,
        }
    }
}

impl TagKind {
    /// The annotation kind a tag is restricted to.
    ///
    /// `None` for regex tags, which apply to the label of any queryable
    /// annotation.
    pub fn annotation_kind(self) -> Option<AnnotationKind> {
        match self {
            TagKind::Semantic => Some(AnnotationKind::Semantic),
            TagKind::Keyword => Some(AnnotationKind::Keyword),
            TagKind::Comment => Some(AnnotationKind::Comment),
            TagKind::Regex => None,
        }
    }

    /// Whether a tag of this kind may match an annotation of `kind`.
    pub fn applies_to(self, kind: AnnotationKind) -> bool {
        kind.is_queryable() && self.annotation_kind().map_or(true, |k| k == kind)
    }
}

/// What an evaluator reads from an annotation.
pub trait AnnotationRecord {
    fn kind(&self) -> AnnotationKind;

    /// Primary textual value (the label shown to users).
    fn label(&self) -> &str;

    /// Ontology source identifiers. Only semantic annotations carry any;
    /// used for synonym expansion when a tag has `synonyms()` set.
    fn sources(&self) -> &[String] {
        &[]
    }
}
