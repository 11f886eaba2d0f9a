use std::fmt;

mod core;

pub use self::core::{scan_source, ScanOutcome};

/// The default bound on the length of a [`crate::context::SearchMatch`]'s
/// `context` string, used when a [`SearcherBuilder`] doesn't override it.
const DEFAULT_MAX_CONTEXT_LENGTH: usize = 512;

/// The default ceiling on a data source's length, above which it is
/// silently skipped rather than scanned.
///
/// 256 MiB, per the engine's tunable constants.
const DEFAULT_MAX_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// An error that can occur while building a [`Searcher`].
///
/// The only way this happens today is an out-of-range `max_context_length`,
/// but this is kept as an enum (rather than, say, a bare `String`) so that
/// a future caller-visible tunable can be validated the same way without
/// breaking this type's public shape.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// `max_context_length` was set to `0`, which would make every match's
    /// context trivially empty (or rather, always exactly the match
    /// substring, which defeats the point of configuring it at all).
    InvalidMaxContextLength,
    /// Hints that destructuring should not be exhaustive.
    #[doc(hidden)]
    __Nonexhaustive,
}

impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ConfigError::InvalidMaxContextLength => {
                write!(f, "grep config error: max_context_length must be > 0")
            }
            ConfigError::__Nonexhaustive => unreachable!(),
        }
    }
}

/// A builder for configuring a [`Searcher`].
///
/// Mirrors the constructor inputs of the search engine: whether to skip
/// binary files, how many lines of context to capture around a match, and
/// the bound on a single match's context string length.
#[derive(Clone, Debug)]
pub struct SearcherBuilder {
    skip_binary_files: bool,
    context_lines: usize,
    max_context_length: usize,
    max_file_size: u64,
}

impl Default for SearcherBuilder {
    fn default() -> SearcherBuilder {
        SearcherBuilder::new()
    }
}

impl SearcherBuilder {
    /// Create a new builder with the engine's defaults: binary files are
    /// not skipped, no context lines are captured, and `max_context_length`
    /// is 512.
    pub fn new() -> SearcherBuilder {
        SearcherBuilder {
            skip_binary_files: false,
            context_lines: 0,
            max_context_length: DEFAULT_MAX_CONTEXT_LENGTH,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Whether the binary-file heuristic should be consulted, skipping
    /// sources it judges to be binary rather than scanning them.
    ///
    /// Disabled by default.
    pub fn skip_binary_files(
        &mut self,
        yes: bool,
    ) -> &mut SearcherBuilder {
        self.skip_binary_files = yes;
        self
    }

    /// The number of lines of context to capture on each side of a match.
    ///
    /// `0` by default, meaning matches are reported with no surrounding
    /// lines.
    pub fn context_lines(
        &mut self,
        lines: usize,
    ) -> &mut SearcherBuilder {
        self.context_lines = lines;
        self
    }

    /// The maximum length, in bytes, of a single [`crate::context::SearchMatch`]'s
    /// `context` string.
    ///
    /// Must be greater than `0`; `build()` returns
    /// [`ConfigError::InvalidMaxContextLength`] otherwise. 512 by default.
    pub fn max_context_length(
        &mut self,
        length: usize,
    ) -> &mut SearcherBuilder {
        self.max_context_length = length;
        self
    }

    /// Override the ceiling on a data source's length above which it is
    /// silently skipped.
    ///
    /// 256 MiB by default. There is no public way to reach this from the
    /// coordinator's own configuration surface today — the engine treats it
    /// as a fixed constant per the tunables table — but it's exposed here
    /// for tests that need to exercise the size gate without allocating a
    /// 256 MiB fixture.
    pub fn max_file_size(&mut self, bytes: u64) -> &mut SearcherBuilder {
        self.max_file_size = bytes;
        self
    }

    /// Build the configured [`Searcher`].
    pub fn build(&self) -> Result<Searcher, ConfigError> {
        if self.max_context_length == 0 {
            return Err(ConfigError::InvalidMaxContextLength);
        }
        Ok(Searcher {
            skip_binary_files: self.skip_binary_files,
            context_lines: self.context_lines,
            max_context_length: self.max_context_length,
            max_file_size: self.max_file_size,
        })
    }
}

/// The resolved, validated configuration for scanning a single data source.
///
/// A `Searcher` holds nothing but plain configuration values — no open
/// files, no buffers — so it's cheap to copy, and the search coordinator
/// hands every worker its own copy rather than sharing one behind a lock.
#[derive(Clone, Copy, Debug)]
pub struct Searcher {
    skip_binary_files: bool,
    context_lines: usize,
    max_context_length: usize,
    max_file_size: u64,
}

impl Searcher {
    /// Returns true if and only if this searcher consults the binary-file
    /// heuristic and skips sources it judges binary.
    pub fn skip_binary_files(&self) -> bool {
        self.skip_binary_files
    }

    /// Returns the number of lines of context captured on each side of a
    /// match.
    pub fn context_lines(&self) -> usize {
        self.context_lines
    }

    /// Returns the configured bound on a match's `context` string length.
    pub fn max_context_length(&self) -> usize {
        self.max_context_length
    }

    /// Returns the ceiling above which a data source is silently skipped.
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }
}
