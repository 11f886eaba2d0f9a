use std::time::Duration;

use grep_searcher::SearchMatch;

use crate::counters::CounterSnapshot;
use crate::error::SearchError;

/// The events a running search reports to its observer, in the order
/// described by the coordinator's state machine.
///
/// Every variant can arrive on any worker thread: event dispatch is
/// synchronous on whichever thread produced it, so an observer that needs
/// UI-thread affinity is responsible for marshaling these itself.
#[derive(Debug)]
pub enum Event {
    /// A periodic sample of the four shared counters, fired roughly every
    /// 100ms while a search is running.
    ProgressChanged(CounterSnapshot),
    /// One or more matches were found in a single data source.
    ///
    /// Exactly one of these is fired per source that produced at least one
    /// match; sources with zero matches never fire this event.
    MatchFound {
        /// The identifier of the data source the matches came from.
        source_id: String,
        /// The matches, in ascending line-number order.
        matches: Vec<SearchMatch>,
    },
    /// A single data source failed to scan.
    Error {
        /// The identifier of the data source that failed, or
        /// `"(general error)"` for the synthetic error fired alongside a
        /// `Reset` when the engine falls back to sequential scanning.
        source_id: String,
        /// The underlying failure.
        cause: SearchError,
    },
    /// Fired immediately before the engine re-runs sequentially after a
    /// failed parallel pass. Observers must discard any `MatchFound`
    /// payloads accumulated so far — the counters backing them have just
    /// been zeroed.
    Reset,
    /// The search has finished: either it ran to completion (possibly
    /// after a fallback) or it was cancelled.
    Completed {
        /// Wall-clock time from `begin()` to this event.
        elapsed: Duration,
        /// The final counter values.
        counters: CounterSnapshot,
        /// Any unrecovered fatal error. `None` on success or cancellation.
        error: Option<SearchError>,
    },
}

/// An observer of a running search's event stream.
///
/// Implemented for any `Fn(Event) + Send + Sync` closure, so most callers
/// never need to name this trait directly — just pass a closure to
/// [`crate::SearchCoordinatorBuilder::build`].
pub trait EventHandler: Send + Sync {
    /// Handle one event.
    ///
    /// Called synchronously on the worker (or coordinator-internal) thread
    /// that produced the event. Implementations must not block for long,
    /// and must be safe to call concurrently from multiple threads.
    fn handle(&self, event: Event);
}

impl<F> EventHandler for F
where
    F: Fn(Event) + Send + Sync,
{
    fn handle(&self, event: Event) {
        self(event)
    }
}
