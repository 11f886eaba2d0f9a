use std::sync::atomic::{AtomicU64, Ordering};

/// A point-in-time read of the four counters, as delivered by
/// `ProgressChanged` and `Completed` events.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CounterSnapshot {
    /// The best-effort total number of data sources to be scanned.
    ///
    /// This comes from a separate enumeration pass over the data source
    /// sequence and may disagree with `done` if that sequence isn't
    /// idempotent; consumers should treat it as an estimate, not a promise.
    pub total: u64,
    /// The number of sources that have finished scanning, for any reason
    /// (matched, found nothing, was skipped, or failed).
    pub done: u64,
    /// The number of sources that failed to scan.
    pub failed: u64,
    /// The number of sources skipped because they looked binary.
    pub skipped: u64,
}

/// The four shared, atomically-updated counters behind a running search.
///
/// Every field is a `Relaxed`-ordered `AtomicU64`: the counters are purely
/// informational (progress reporting and the final summary), so there's no
/// happens-before relationship for any other thread to depend on beyond
/// "this number only moves forward within a pass."
#[derive(Debug, Default)]
pub struct Counters {
    total: AtomicU64,
    done: AtomicU64,
    failed: AtomicU64,
    skipped: AtomicU64,
}

impl Counters {
    /// Construct a fresh, zeroed set of counters.
    pub fn new() -> Counters {
        Counters::default()
    }

    /// Set `total`, overwriting whatever was there before.
    pub fn set_total(&self, total: u64) {
        self.total.store(total, Ordering::Relaxed);
    }

    /// Increment `done` by one.
    pub fn incr_done(&self) {
        self.done.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment `failed` by one.
    pub fn incr_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment `skipped` by one.
    pub fn incr_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Zero `done`, `failed`, and `skipped`, leaving `total` untouched.
    ///
    /// Used when the fallback path discards the failed parallel pass's
    /// progress before re-running sequentially.
    pub fn reset_progress(&self) {
        self.done.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.skipped.store(0, Ordering::Relaxed);
    }

    /// Zero all four counters, including `total`.
    ///
    /// Used once, at the start of `begin()`.
    pub fn reset_all(&self) {
        self.total.store(0, Ordering::Relaxed);
        self.reset_progress();
    }

    /// Take a consistent-enough point-in-time snapshot of all four
    /// counters.
    ///
    /// This is not atomic as a whole (each field is loaded independently),
    /// which matches the engine's design: the counters are sampled for
    /// progress display, not for an invariant that depends on them moving
    /// together.
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            total: self.total.load(Ordering::Relaxed),
            done: self.done.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }
}
