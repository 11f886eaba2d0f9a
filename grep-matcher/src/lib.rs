/*!
A trait for regular expressions, with a focus on line oriented search.

This crate doesn't provide a regex implementation directly. Instead, it
defines a [`Matcher`] trait that abstracts over however a concrete engine
chooses to find matches, along with a [`Match`] type used throughout the
rest of the search engine to describe a byte range.

The point of the abstraction is that the concurrent search coordinator
needs to clone a compiled pattern once per worker thread (see the crate
docs on `grep-searcher`), and different regex engines have different
opinions about whether that's even necessary. Depending on a trait instead
of a concrete `regex::Regex` keeps that decision out of the searcher.
*/

#![deny(missing_docs)]

use std::error;
use std::fmt;

/// A representation of a range in a haystack.
///
/// This is like `std::ops::Range<usize>`, but it additionally implements
/// `Copy` and provides a few convenience constructors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Match {
    start: usize,
    end: usize,
}

impl Match {
    /// Create a new match from a byte range.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Match {
        assert!(start <= end, "invalid match range: {start} > {end}");
        Match { start, end }
    }

    /// Returns the start offset of this match.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the end offset of this match.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the number of bytes in this match.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if and only if this match is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Offset this match's start and end by the given amount.
    pub fn offset(&self, amount: usize) -> Match {
        Match { start: self.start + amount, end: self.end + amount }
    }
}

impl From<std::ops::Range<usize>> for Match {
    fn from(r: std::ops::Range<usize>) -> Match {
        Match::new(r.start, r.end)
    }
}

impl std::ops::Index<Match> for [u8] {
    type Output = [u8];

    fn index(&self, index: Match) -> &[u8] {
        &self[index.start..index.end]
    }
}

impl std::ops::Index<Match> for str {
    type Output = str;

    fn index(&self, index: Match) -> &str {
        &self[index.start..index.end]
    }
}

/// An error that can occur inside a `Matcher` implementation.
///
/// This is deliberately opaque: callers only ever see it through
/// `std::error::Error`, since the concrete regex engine backing a
/// `Matcher` impl is free to fail for its own reasons (a malformed
/// pattern, a scratch-space allocation failure, and so on).
#[derive(Debug)]
pub struct MatchError(String);

impl MatchError {
    /// Construct a new opaque matcher error from a message.
    pub fn new<M: fmt::Display>(msg: M) -> MatchError {
        MatchError(msg.to_string())
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl error::Error for MatchError {
    fn description(&self) -> &str {
        "matcher error"
    }
}

/// A trait that describes implementations of regular expression search.
///
/// The `Matcher` trait is the boundary between the line oriented scanning
/// done by the searcher and whatever concrete regex engine is actually
/// answering "does this match?" and "where?". It is intentionally narrow:
/// the searcher only ever needs the leftmost-first match in a single line,
/// never capture groups or replacement.
///
/// Implementations of `Matcher` are expected to be cheaply `Clone`-able,
/// since each worker thread in the coordinator's pool clones its own copy
/// to avoid sharing whatever internal scratch space the engine uses during
/// a search.
pub trait Matcher: Clone {
    /// Find the leftmost-first match in `haystack`, if one exists.
    fn find(&self, haystack: &[u8]) -> Result<Option<Match>, MatchError>;

    /// Returns true if and only if this matcher finds a match anywhere in
    /// `haystack`.
    ///
    /// The default implementation calls `find` and discards the match, but
    /// implementations backed by an engine that can answer this more
    /// cheaply (e.g., without computing the match's end offset) should
    /// override it.
    fn is_match(&self, haystack: &[u8]) -> Result<bool, MatchError> {
        Ok(self.find(haystack)?.is_some())
    }

    /// Find every non-overlapping match in `haystack`, left to right.
    ///
    /// The default implementation repeatedly calls `find`, advancing past
    /// each match (or by one byte, for an empty match, to guarantee
    /// forward progress).
    fn find_iter(
        &self,
        haystack: &[u8],
    ) -> Result<Vec<Match>, MatchError> {
        let mut matches = vec![];
        let mut last_end = 0;
        while last_end <= haystack.len() {
            let m = match self.find(&haystack[last_end..])? {
                None => break,
                Some(m) => m.offset(last_end),
            };
            last_end = if m.is_empty() { m.end() + 1 } else { m.end() };
            matches.push(m);
        }
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Literal(&'static str);

    impl Matcher for Literal {
        fn find(&self, haystack: &[u8]) -> Result<Option<Match>, MatchError> {
            let needle = self.0.as_bytes();
            if needle.is_empty() {
                return Ok(Some(Match::new(0, 0)));
            }
            Ok(memchr::memmem::find(haystack, needle)
                .map(|i| Match::new(i, i + needle.len())))
        }
    }

    #[test]
    fn find_iter_advances_past_each_match() {
        let m = Literal("foo");
        let ms = m.find_iter(b"foo bar foo").unwrap();
        assert_eq!(ms, vec![Match::new(0, 3), Match::new(8, 11)]);
    }

    #[test]
    fn is_match_default_impl() {
        let m = Literal("bar");
        assert!(m.is_match(b"foo bar").unwrap());
        assert!(!m.is_match(b"foo baz").unwrap());
    }

    #[test]
    fn match_index_on_str() {
        let s = "hello world";
        let m = Match::new(6, 11);
        assert_eq!(&s[m], "world");
    }
}
