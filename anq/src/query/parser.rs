//! Recursive-descent parser for the query grammar.
//!
//! Alternatives are tried in grammar order and repetitions are greedy. Every
//! terminal that fails to match is recorded; on failure the error reports the
//! furthest such position together with everything that was expected there.

use super::grammar::{CharClass, Grammar, TagBody};
use super::sexpr::{BiOperator, Sexpr, Tag};
use crate::ParseError;

/// A terminal the parser looked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expected<'g> {
    Literal(&'g str),
    Class(CharClass),
    End,
}

impl Expected<'_> {
    fn describe(self) -> String {
        match self {
            Expected::Literal(text) => quote(text),
            Expected::Class(class) => class.description().to_string(),
            Expected::End => "end of input".to_string(),
        }
    }
}

/// Why a rule stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Halt {
    /// No alternative matched; details are in the expectation set.
    Mismatch,
    /// Nesting limit exceeded at this byte offset.
    TooDeep(usize),
}

type Step<T> = std::result::Result<T, Halt>;

pub(crate) struct Parser<'g, 'i> {
    grammar: &'g Grammar,
    input: &'i str,
    /// Byte offset of the next unread character.
    pos: usize,
    /// Byte offset of the furthest failed terminal.
    furthest: usize,
    expected: Vec<Expected<'g>>,
}

impl<'g, 'i> Parser<'g, 'i> {
    pub(crate) fn new(grammar: &'g Grammar, input: &'i str) -> Self {
        Self {
            grammar,
            input,
            pos: 0,
            furthest: 0,
            expected: Vec::new(),
        }
    }

    /// Parse the whole input as one query.
    pub(crate) fn run(mut self) -> Result<Sexpr, ParseError> {
        match self.query(0) {
            Ok(tree) if self.pos == self.input.len() => Ok(tree),
            Ok(_) => {
                self.fail(self.pos, Expected::End);
                Err(self.error())
            }
            Err(Halt::Mismatch) => Err(self.error()),
            Err(Halt::TooDeep(at)) => Err(ParseError::new(
                format!(
                    "Query nests deeper than the limit of {} levels",
                    self.grammar.max_depth
                ),
                self.column(at),
            )),
        }
    }

    // Rules

    /// `query`: a right-folded chain of `expr OP` links ending in an `expr`
    /// or a negation.
    fn query(&mut self, depth: usize) -> Step<Sexpr> {
        let mut links: Vec<(Sexpr, BiOperator)> = Vec::new();

        let last = loop {
            let level = depth + links.len();
            let start = self.pos;
            match self.expr(level) {
                Ok(lhs) => match self.operator() {
                    Some(op) => links.push((lhs, op)),
                    None => break lhs,
                },
                Err(Halt::Mismatch) => {
                    self.pos = start;
                    break self.negation(level)?;
                }
                Err(halt) => return Err(halt),
            }
        };

        Ok(links
            .into_iter()
            .rev()
            .fold(last, |right, (left, op)| Sexpr::binary(op, left, right)))
    }

    /// `white "NOT"i white expr`
    fn negation(&mut self, depth: usize) -> Step<Sexpr> {
        let grammar = self.grammar;
        let start = self.pos;
        self.white();
        if !self.keyword(grammar.negation) {
            self.pos = start;
            return Err(Halt::Mismatch);
        }
        self.white();
        let operand = self.expr(depth + 1)?;
        Ok(Sexpr::not(operand))
    }

    /// `white ("AND"i / "OR"i / "XOR"i) white`, restoring the position if no
    /// keyword follows.
    fn operator(&mut self) -> Option<BiOperator> {
        let grammar = self.grammar;
        let start = self.pos;
        self.white();
        let after_white = self.pos;
        for &(op, keyword) in &grammar.operators {
            self.pos = after_white;
            if self.keyword(keyword) {
                self.white();
                return Some(op);
            }
        }
        self.pos = start;
        None
    }

    /// `tag / "(" query ")"`
    fn expr(&mut self, depth: usize) -> Step<Sexpr> {
        if depth > self.grammar.max_depth {
            return Err(Halt::TooDeep(self.pos));
        }
        if let Some(tag) = self.tag() {
            return Ok(Sexpr::Tag(tag));
        }

        let grammar = self.grammar;
        if !self.literal(grammar.open) {
            return Err(Halt::Mismatch);
        }
        let inner = self.query(depth + 1)?;
        if !self.literal(grammar.close) {
            return Err(Halt::Mismatch);
        }
        Ok(inner)
    }

    fn tag(&mut self) -> Option<Tag> {
        let grammar = self.grammar;
        let start = self.pos;

        for rule in &grammar.tags {
            if !self.literal(&rule.prefix) {
                continue;
            }
            let parsed = match &rule.body {
                TagBody::Value { synonyms_suffix } => self.value().map(|value| {
                    let synonyms = match synonyms_suffix {
                        Some(suffix) => self.literal(*suffix),
                        None => false,
                    };
                    Tag::of_kind(rule.kind, value, synonyms)
                }),
                TagBody::Delimited { terminator } => match self.run_of(CharClass::Regex) {
                    Some(value) if self.literal(*terminator) => {
                        Some(Tag::of_kind(rule.kind, value, false))
                    }
                    _ => None,
                },
            };
            match parsed {
                Some(tag) => return Some(tag),
                None => self.pos = start,
            }
        }
        None
    }

    /// `[a-zA-Z0-9]+ / '"' [^"]+ '"'`
    fn value(&mut self) -> Option<&'i str> {
        if let Some(word) = self.run_of(CharClass::Alnum) {
            return Some(word);
        }

        let quote = self.grammar.quote;
        let start = self.pos;
        if !self.literal(quote) {
            return None;
        }
        match self.run_of(CharClass::Unquoted) {
            Some(text) if self.literal(quote) => Some(text),
            _ => {
                self.pos = start;
                None
            }
        }
    }

    /// `[ ]*`
    fn white(&mut self) {
        while self.class(CharClass::Space) {}
    }

    // Terminals

    fn literal(&mut self, text: &'g str) -> bool {
        if self.rest().starts_with(text) {
            self.pos += text.len();
            true
        } else {
            self.fail(self.pos, Expected::Literal(text));
            false
        }
    }

    /// ASCII case-insensitive literal.
    fn keyword(&mut self, text: &'g str) -> bool {
        let candidate = self.input.as_bytes().get(self.pos..self.pos + text.len());
        if candidate.is_some_and(|bytes| bytes.eq_ignore_ascii_case(text.as_bytes())) {
            self.pos += text.len();
            true
        } else {
            self.fail(self.pos, Expected::Literal(text));
            false
        }
    }

    fn class(&mut self, class: CharClass) -> bool {
        match self.rest().chars().next() {
            Some(c) if class.matches(c) => {
                self.pos += c.len_utf8();
                true
            }
            _ => {
                self.fail(self.pos, Expected::Class(class));
                false
            }
        }
    }

    /// One or more characters of `class`.
    fn run_of(&mut self, class: CharClass) -> Option<&'i str> {
        let start = self.pos;
        while self.class(class) {}
        if self.pos > start {
            Some(&self.input[start..self.pos])
        } else {
            None
        }
    }

    // Failure bookkeeping

    fn rest(&self) -> &'i str {
        &self.input[self.pos..]
    }

    fn fail(&mut self, at: usize, expected: Expected<'g>) {
        if at < self.furthest {
            return;
        }
        if at > self.furthest {
            self.furthest = at;
            self.expected.clear();
        }
        self.expected.push(expected);
    }

    fn column(&self, byte_offset: usize) -> usize {
        self.input[..byte_offset].chars().count()
    }

    fn error(&self) -> ParseError {
        let mut descriptions: Vec<String> = self.expected.iter().map(|e| e.describe()).collect();
        descriptions.sort();
        descriptions.dedup();

        let expected = match descriptions.as_slice() {
            [] => "end of input".to_string(),
            [only] => only.clone(),
            [first, second] => format!("{} or {}", first, second),
            [init @ .., last] => format!("{}, or {}", init.join(", "), last),
        };
        let found = match self.input[self.furthest..].chars().next() {
            Some(c) => quote(c.encode_utf8(&mut [0; 4])),
            None => "end of input".to_string(),
        };

        ParseError::new(
            format!("Expected {} but {} found.", expected, found),
            self.column(self.furthest),
        )
    }
}

/// Double-quote `text`, escaping quotes, backslashes and control characters.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\0' => out.push_str("\\0"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("AND"), "\"AND\"");
        assert_eq!(quote("\""), "\"\\\"\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
        assert_eq!(quote("\n"), "\"\\n\"");
        assert_eq!(quote("\u{1}"), "\"\\x01\"");
    }
}
