//! Single-letter markers that introduce tag terms in query text.

use super::sexpr::TagKind;

/// Marker written before `:` for a tag kind.
///
/// Every kind has exactly one marker; adding a kind without a marker here is
/// a compile error.
pub fn marker_of(kind: TagKind) -> &'static str {
    match kind {
        TagKind::Semantic => "s",
        TagKind::Keyword => "k",
        TagKind::Comment => "c",
        TagKind::Regex => "r",
    }
}

impl TagKind {
    /// Marker for this kind (`s`, `k`, `c` or `r`).
    pub fn marker(self) -> &'static str {
        marker_of(self)
    }

    /// Inverse of `marker_of`.
    pub fn from_marker(marker: &str) -> Option<TagKind> {
        TagKind::ALL.into_iter().find(|kind| marker_of(*kind) == marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_of_each_kind() {
        assert_eq!(marker_of(TagKind::Semantic), "s");
        assert_eq!(marker_of(TagKind::Keyword), "k");
        assert_eq!(marker_of(TagKind::Comment), "c");
        assert_eq!(marker_of(TagKind::Regex), "r");
    }

    #[test]
    fn test_from_marker_round_trip() {
        for kind in TagKind::ALL {
            assert_eq!(TagKind::from_marker(kind.marker()), Some(kind));
        }
        assert_eq!(TagKind::from_marker("x"), None);
        assert_eq!(TagKind::from_marker(""), None);
    }

    #[test]
    fn test_all_lists_every_kind_once() {
        // Fails to compile if a kind is added without extending the arms.
        let position = |kind: TagKind| match kind {
            TagKind::Semantic => 0,
            TagKind::Keyword => 1,
            TagKind::Comment => 2,
            TagKind::Regex => 3,
        };
        for (i, kind) in TagKind::ALL.into_iter().enumerate() {
            assert_eq!(position(kind), i);
        }
    }
}
