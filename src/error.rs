use std::fmt;
use std::io;

/// The typed error hierarchy used throughout the search engine.
///
/// Only [`SearchError::InvalidArgument`] and [`SearchError::InvalidState`]
/// are ever returned synchronously to a caller (from
/// [`crate::SearchCoordinatorBuilder::build`] and
/// [`crate::SearchCoordinator::begin`], respectively). The remaining
/// variants are observed, not thrown: they travel as the `cause` of an
/// `Error` event or as the optional fatal error in a `Completed` event, per
/// the engine's error-handling policy of never aborting a running search.
#[derive(Debug)]
pub enum SearchError {
    /// A constructor or builder argument was invalid, e.g. a
    /// `max_context_length` of zero.
    InvalidArgument(String),
    /// `begin()` was called while a prior search was still running.
    InvalidState(String),
    /// A single data source failed to scan: I/O, decoding, classifier, or
    /// regex-runtime failure. Never escapes as a top-level error — it is
    /// always carried as the `cause` of an `Error` event.
    PerFile(io::Error),
    /// The parallel worker-pool driver observed an I/O failure while
    /// enumerating data sources (as opposed to a single source failing to
    /// open or scan). This is the trigger for the one-shot
    /// parallel-to-sequential fallback.
    Aggregate(io::Error),
    /// Any other non-cancellation failure that escaped the search loop.
    /// Surfaced at most once, in the `Completed` event's optional error
    /// field.
    Fatal(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidArgument(msg) => {
                write!(f, "invalid argument: {msg}")
            }
            SearchError::InvalidState(msg) => {
                write!(f, "invalid state: {msg}")
            }
            SearchError::PerFile(err) => write!(f, "search failed: {err}"),
            SearchError::Aggregate(err) => {
                write!(f, "aggregate I/O failure during parallel scan: {err}")
            }
            SearchError::Fatal(msg) => write!(f, "fatal error: {msg}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::PerFile(err) | SearchError::Aggregate(err) => {
                Some(err)
            }
            _ => None,
        }
    }
}
