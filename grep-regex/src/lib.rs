/*!
An implementation of `grep_matcher::Matcher` backed by Rust's `regex` crate.

This is the only `Matcher` implementation this workspace ships, but keeping
it behind the `grep-matcher` trait means the searcher never hard-codes
which engine it's talking to.
*/

#![deny(missing_docs)]

use grep_matcher::{Match, MatchError, Matcher};
use regex::bytes::Regex;

/// A builder for compiling a pattern into a [`RegexMatcher`].
///
/// This is the "compiled regular expression with options" referred to
/// elsewhere as a `CompiledPattern`: once built, it is immutable, and
/// cheap to clone (the underlying `regex::bytes::Regex` is reference
/// counted internally).
#[derive(Clone, Debug, Default)]
pub struct RegexMatcherBuilder {
    case_insensitive: bool,
    multi_line: bool,
}

impl RegexMatcherBuilder {
    /// Create a new builder with the default (case-sensitive,
    /// single-line) options.
    pub fn new() -> RegexMatcherBuilder {
        RegexMatcherBuilder::default()
    }

    /// Whether the pattern should match case-insensitively.
    pub fn case_insensitive(&mut self, yes: bool) -> &mut RegexMatcherBuilder {
        self.case_insensitive = yes;
        self
    }

    /// Whether `^`/`$` should match at line boundaries within the
    /// haystack, rather than only at its start/end.
    ///
    /// The searcher itself never hands a `Matcher` more than one line at
    /// a time, so this only matters for patterns that embed their own
    /// notion of multi-line anchors.
    pub fn multi_line(&mut self, yes: bool) -> &mut RegexMatcherBuilder {
        self.multi_line = yes;
        self
    }

    /// Compile the given pattern into a matcher.
    ///
    /// Returns an error if the pattern is not a valid regular expression.
    pub fn build(&self, pattern: &str) -> Result<RegexMatcher, MatchError> {
        let mut flags = String::new();
        if self.case_insensitive {
            flags.push('i');
        }
        if self.multi_line {
            flags.push('m');
        }
        let pattern = if flags.is_empty() {
            pattern.to_string()
        } else {
            format!("(?{flags}){pattern}")
        };
        log::debug!("compiling pattern: {pattern}");
        let regex =
            Regex::new(&pattern).map_err(|err| MatchError::new(err))?;
        Ok(RegexMatcher { regex })
    }
}

/// A `Matcher` implementation backed by `regex::bytes::Regex`.
///
/// Cloning a `RegexMatcher` clones the underlying `Regex`, which is a
/// cheap reference-count bump rather than a recompilation. Each search
/// worker clones its own copy so that match-time scratch space (which
/// `regex` allocates lazily and caches per-thread) is never shared across
/// threads.
#[derive(Clone, Debug)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    /// Compile `pattern` with default options.
    ///
    /// Equivalent to `RegexMatcherBuilder::new().build(pattern)`.
    pub fn new(pattern: &str) -> Result<RegexMatcher, MatchError> {
        RegexMatcherBuilder::new().build(pattern)
    }
}

impl Matcher for RegexMatcher {
    fn find(&self, haystack: &[u8]) -> Result<Option<Match>, MatchError> {
        Ok(self
            .regex
            .find(haystack)
            .map(|m| Match::new(m.start(), m.end())))
    }

    fn is_match(&self, haystack: &[u8]) -> Result<bool, MatchError> {
        Ok(self.regex.is_match(haystack))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_leftmost_match() {
        let m = RegexMatcher::new(r"\d+").unwrap();
        let got = m.find(b"abc 123 def 456").unwrap().unwrap();
        assert_eq!(&b"abc 123 def 456"[got], b"123");
    }

    #[test]
    fn case_insensitive_option() {
        let m = RegexMatcherBuilder::new()
            .case_insensitive(true)
            .build("hello")
            .unwrap();
        assert!(m.is_match(b"say HELLO there").unwrap());
    }

    #[test]
    fn clone_is_independent() {
        let m1 = RegexMatcher::new("foo").unwrap();
        let m2 = m1.clone();
        assert!(m1.is_match(b"foo").unwrap());
        assert!(m2.is_match(b"foo").unwrap());
    }

    #[test]
    fn invalid_pattern_errors() {
        assert!(RegexMatcher::new("(unclosed").is_err());
    }
}
