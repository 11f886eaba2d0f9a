use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use grep_matcher::Matcher;
use grep_searcher::{
    scan_source, ConfigError, DataSource, MimeClassifier, ScanOutcome,
    Searcher, SearcherBuilder,
};

use crate::counters::Counters;
use crate::error::SearchError;
use crate::events::{Event, EventHandler};

/// How often the progress reporter samples the shared counters.
const PROGRESS_TICK: Duration = Duration::from_millis(100);

/// An iterator over the data sources to search, fallibly: an `Err` means
/// the upstream enumeration (not an individual source) failed, which is
/// the trigger for the parallel-to-sequential fallback.
pub type SourceIter =
    Box<dyn Iterator<Item = io::Result<Box<dyn DataSource>>> + Send>;

/// A lazily-reproducible supply of data sources.
///
/// The coordinator needs to walk the data source sequence up to three
/// times per `begin()` call — once to count it for progress reporting,
/// once for the parallel pass, and once more for the sequential fallback,
/// if triggered — so it asks for a fresh iterator each time rather than
/// consuming a single one. Implemented for any `Fn() -> SourceIter + Send +
/// Sync` closure, so most callers just pass a closure to
/// [`SearchCoordinatorBuilder::build`].
pub trait SourceFactory: Send + Sync {
    /// Produce a fresh iterator over the data source sequence.
    fn produce(&self) -> SourceIter;
}

impl<F> SourceFactory for F
where
    F: Fn() -> SourceIter + Send + Sync,
{
    fn produce(&self) -> SourceIter {
        self()
    }
}

/// The coordinator's own lifecycle state, independent of the counters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Idle,
    Running,
    Completed,
    Cancelled,
}

struct Inner {
    state: State,
    driver: Option<thread::JoinHandle<()>>,
}

/// A builder for configuring a [`SearchCoordinator`].
///
/// Mirrors the constructor inputs described in the engine's external
/// interface: whether to skip binary files, how many lines of context to
/// capture, and the bound on a match's context string length.
#[derive(Clone, Debug, Default)]
pub struct SearchCoordinatorBuilder {
    skip_binary_files: bool,
    context_lines: usize,
    max_context_length: Option<usize>,
}

impl SearchCoordinatorBuilder {
    /// Create a new builder with the engine's defaults.
    pub fn new() -> SearchCoordinatorBuilder {
        SearchCoordinatorBuilder::default()
    }

    /// Whether to consult the binary-file heuristic and skip sources it
    /// judges binary. Disabled by default.
    pub fn skip_binary_files(
        &mut self,
        yes: bool,
    ) -> &mut SearchCoordinatorBuilder {
        self.skip_binary_files = yes;
        self
    }

    /// The number of lines of context to capture on each side of a match.
    /// `0` by default.
    pub fn context_lines(
        &mut self,
        lines: usize,
    ) -> &mut SearchCoordinatorBuilder {
        self.context_lines = lines;
        self
    }

    /// The maximum length, in bytes, of a single match's `context` string.
    /// Must be greater than `0`; `build()` returns
    /// [`SearchError::InvalidArgument`] otherwise. 512 by default.
    pub fn max_context_length(
        &mut self,
        length: usize,
    ) -> &mut SearchCoordinatorBuilder {
        self.max_context_length = Some(length);
        self
    }

    /// Build a [`SearchCoordinator`] over `sources`, matching against
    /// `matcher`, reporting events to `on_event`.
    ///
    /// Returns [`SearchError::InvalidArgument`] if `max_context_length` was
    /// explicitly set to `0`.
    pub fn build<M, S, H>(
        &self,
        matcher: M,
        sources: S,
        on_event: H,
    ) -> Result<SearchCoordinator<M>, SearchError>
    where
        M: Matcher + Clone + Send + 'static,
        S: SourceFactory + 'static,
        H: EventHandler + 'static,
    {
        let mut builder = SearcherBuilder::new();
        builder.skip_binary_files(self.skip_binary_files);
        builder.context_lines(self.context_lines);
        if let Some(len) = self.max_context_length {
            builder.max_context_length(len);
        }
        let searcher = builder.build().map_err(|err: ConfigError| {
            SearchError::InvalidArgument(err.to_string())
        })?;

        Ok(SearchCoordinator {
            matcher,
            sources: Arc::new(sources),
            searcher,
            on_event: Arc::new(on_event),
            counters: Arc::new(Counters::new()),
            cancel: Arc::new(AtomicBool::new(false)),
            inner: Arc::new(Mutex::new(Inner {
                state: State::Idle,
                driver: None,
            })),
        })
    }
}

/// The concurrent search coordinator: a worker pool over a lazy supply of
/// data sources, with progress reporting, cooperative cancellation, and a
/// one-shot parallel-to-sequential fallback on aggregate I/O failure.
///
/// Construct one with [`SearchCoordinatorBuilder`], then call
/// [`SearchCoordinator::begin`] to start a search, [`SearchCoordinator::cancel`]
/// to stop one early, and [`SearchCoordinator::wait`] to block until it's
/// done. A single coordinator can run many searches over its lifetime, one
/// at a time.
pub struct SearchCoordinator<M: Matcher + Clone + Send + 'static> {
    matcher: M,
    sources: Arc<dyn SourceFactory>,
    searcher: Searcher,
    on_event: Arc<dyn EventHandler>,
    counters: Arc<Counters>,
    cancel: Arc<AtomicBool>,
    inner: Arc<Mutex<Inner>>,
}

impl<M: Matcher + Clone + Send + 'static> SearchCoordinator<M> {
    /// Start a search.
    ///
    /// Returns [`SearchError::InvalidState`] if a previous search launched
    /// by this coordinator is still running. Otherwise returns immediately;
    /// the search runs on background threads and reports its progress
    /// through the event handler passed to the builder.
    pub fn begin(&self) -> Result<(), SearchError> {
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.state == State::Running {
                return Err(SearchError::InvalidState(
                    "a search is already running".to_string(),
                ));
            }
            inner.state = State::Running;
            inner.driver = None;
        }

        self.cancel.store(false, Ordering::SeqCst);
        self.counters.reset_all();

        let matcher = self.matcher.clone();
        let sources = Arc::clone(&self.sources);
        let searcher = self.searcher;
        let on_event = Arc::clone(&self.on_event);
        let counters = Arc::clone(&self.counters);
        let cancel = Arc::clone(&self.cancel);
        let inner_for_driver = Arc::clone(&self.inner);

        let driver = thread::spawn(move || {
            run_driver(
                matcher, sources, searcher, on_event, counters, &cancel,
                inner_for_driver,
            );
        });

        let mut inner = self.inner.lock().unwrap();
        inner.driver = Some(driver);
        Ok(())
    }

    /// Request cancellation and block until the search and progress
    /// reporter have both observed it and exited.
    ///
    /// Idempotent: calling this more than once, or after the search has
    /// already finished on its own, is a safe no-op.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
        self.wait();
    }

    /// Block until the search and progress reporter have both terminated.
    ///
    /// A safe no-op if no search is running (or none ever was).
    pub fn wait(&self) {
        let driver = {
            let mut inner = self.inner.lock().unwrap();
            inner.driver.take()
        };
        if let Some(driver) = driver {
            let _ = driver.join();
        }
    }
}

/// The body of the background thread spawned by `begin()`: it runs the
/// counter task and progress task as child threads of its own, drives the
/// parallel search pass, and performs the fallback if needed.
fn run_driver<M>(
    matcher: M,
    sources: Arc<dyn SourceFactory>,
    searcher: Searcher,
    on_event: Arc<dyn EventHandler>,
    counters: Arc<Counters>,
    cancel: &Arc<AtomicBool>,
    inner: Arc<Mutex<Inner>>,
) where
    M: Matcher + Clone + Send + 'static,
{
    let start = Instant::now();

    let counter_handle = {
        let sources = Arc::clone(&sources);
        let counters = Arc::clone(&counters);
        let cancel = Arc::clone(cancel);
        thread::spawn(move || count_sources(&*sources, &counters, &cancel))
    };

    let progress_done = Arc::new(AtomicBool::new(false));
    let progress_handle = {
        let counters = Arc::clone(&counters);
        let on_event = Arc::clone(&on_event);
        let cancel = Arc::clone(cancel);
        let progress_done = Arc::clone(&progress_done);
        thread::spawn(move || {
            run_progress_reporter(&counters, &*on_event, &cancel, &progress_done)
        })
    };

    let first_pass = run_search(
        &matcher, &*sources, searcher, &on_event, &counters, cancel, true,
    );
    let cancelled = cancel.load(Ordering::SeqCst);

    let final_error = match first_pass {
        Ok(()) => None,
        Err(SearchError::Aggregate(io_err)) if !cancelled => {
            log::warn!(
                "parallel scan failed with an aggregate I/O error, \
                 falling back to sequential scanning: {io_err}"
            );
            counters.reset_progress();
            on_event.handle(Event::Reset);
            on_event.handle(Event::Error {
                source_id: "(general error)".to_string(),
                cause: SearchError::Aggregate(io_err),
            });
            match run_search(
                &matcher, &*sources, searcher, &on_event, &counters, cancel,
                false,
            ) {
                Ok(()) => None,
                Err(err) => Some(err),
            }
        }
        Err(err) => Some(err),
    };

    progress_done.store(true, Ordering::SeqCst);
    let _ = progress_handle.join();
    let _ = counter_handle.join();

    {
        let mut guard = inner.lock().unwrap();
        guard.state = if cancelled { State::Cancelled } else { State::Completed };
    }

    on_event.handle(Event::Completed {
        elapsed: start.elapsed(),
        counters: counters.snapshot(),
        error: if cancelled { None } else { final_error },
    });
}

/// The counter task: walk the data source sequence once purely to count
/// it, writing `total` when done (or when cancelled). Failures while
/// enumerating are swallowed here — an aggregate failure is the search
/// task's concern, not the counter task's, and `total` is documented as a
/// best-effort estimate.
fn count_sources(
    sources: &dyn SourceFactory,
    counters: &Counters,
    cancel: &AtomicBool,
) {
    let mut total = 0u64;
    for _item in sources.produce() {
        if cancel.load(Ordering::SeqCst) {
            break;
        }
        total += 1;
    }
    counters.set_total(total);
}

/// The progress task: every [`PROGRESS_TICK`], sample the counters and
/// fire `ProgressChanged`, until cancellation is observed or the search
/// task signals it has finished via `done`.
fn run_progress_reporter(
    counters: &Counters,
    on_event: &dyn EventHandler,
    cancel: &AtomicBool,
    done: &AtomicBool,
) {
    loop {
        thread::sleep(PROGRESS_TICK);
        if cancel.load(Ordering::SeqCst) || done.load(Ordering::SeqCst) {
            return;
        }
        on_event.handle(Event::ProgressChanged(counters.snapshot()));
    }
}

/// Run one pass of the search, either in parallel (`parallel = true`, one
/// worker thread per available core) or sequentially (`parallel = false`,
/// a single worker thread).
///
/// Returns `Err(SearchError::Aggregate(_))` if the data source sequence
/// itself failed to enumerate partway through — as opposed to a single
/// source failing to open or scan, which is routed through an `Error`
/// event and never fails the pass.
fn run_search<M>(
    matcher: &M,
    sources: &dyn SourceFactory,
    searcher: Searcher,
    on_event: &Arc<dyn EventHandler>,
    counters: &Arc<Counters>,
    cancel: &Arc<AtomicBool>,
    parallel: bool,
) -> Result<(), SearchError>
where
    M: Matcher + Clone + Send + 'static,
{
    let worker_count = if parallel { num_cpus::get().max(1) } else { 1 };
    let (tx, rx) =
        crossbeam_channel::bounded::<Box<dyn DataSource>>(worker_count * 2);

    let worker_handles: Vec<_> = (0..worker_count)
        .map(|_| {
            let rx = rx.clone();
            let matcher = matcher.clone();
            let counters = Arc::clone(counters);
            let cancel = Arc::clone(cancel);
            let on_event = Arc::clone(on_event);
            thread::spawn(move || {
                worker_loop(rx, matcher, searcher, on_event, counters, cancel)
            })
        })
        .collect();
    drop(rx);

    let mut aggregate_err = None;
    for item in sources.produce() {
        if cancel.load(Ordering::SeqCst) {
            break;
        }
        match item {
            Ok(source) => {
                if tx.send(source).is_err() {
                    break;
                }
            }
            Err(io_err) => {
                aggregate_err = Some(io_err);
                break;
            }
        }
    }
    drop(tx);

    for handle in worker_handles {
        let _ = handle.join();
    }

    match aggregate_err {
        Some(io_err) => Err(SearchError::Aggregate(io_err)),
        None => Ok(()),
    }
}

fn worker_loop<M>(
    rx: crossbeam_channel::Receiver<Box<dyn DataSource>>,
    matcher: M,
    searcher: Searcher,
    on_event: Arc<dyn EventHandler>,
    counters: Arc<Counters>,
    cancel: Arc<AtomicBool>,
) where
    M: Matcher,
{
    let classifier = MimeClassifier::new();
    log::trace!("search worker starting, mime classifier initialized");
    let mut prefix_pool: Vec<u8> = Vec::new();
    let is_cancelled = || cancel.load(Ordering::SeqCst);

    while let Ok(source) = rx.recv() {
        if is_cancelled() {
            break;
        }
        let id = source.identifier().to_string();
        let outcome = scan_one(
            &*source, &searcher, &matcher, &classifier, &mut prefix_pool,
            &is_cancelled,
        );
        match outcome {
            Ok(ScanOutcome::Scanned(matches)) => {
                counters.incr_done();
                if !matches.is_empty() {
                    on_event.handle(Event::MatchFound {
                        source_id: id,
                        matches,
                    });
                }
            }
            Ok(ScanOutcome::SilentlySkipped) => {
                counters.incr_done();
            }
            Ok(ScanOutcome::BinarySkipped) => {
                counters.incr_done();
                counters.incr_skipped();
                log::debug!("skipped likely-binary source: {id}");
            }
            Ok(ScanOutcome::Cancelled) => {}
            Err(io_err) => {
                counters.incr_done();
                counters.incr_failed();
                log::warn!("search failed for {id}: {io_err}");
                on_event.handle(Event::Error {
                    source_id: id,
                    cause: SearchError::PerFile(io_err),
                });
            }
        }
    }
    log::trace!("search worker exiting, mime classifier released");
}

fn scan_one<M: Matcher>(
    source: &dyn DataSource,
    searcher: &Searcher,
    matcher: &M,
    classifier: &MimeClassifier,
    prefix_pool: &mut Vec<u8>,
    is_cancelled: &dyn Fn() -> bool,
) -> io::Result<ScanOutcome> {
    if is_cancelled() {
        return Ok(ScanOutcome::Cancelled);
    }
    let len = source.len()?;
    let mut reader = source.open_read()?;
    scan_source(
        &mut *reader, len, searcher, matcher, classifier, prefix_pool,
        is_cancelled,
    )
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Mutex;

    use grep_regex::RegexMatcher;
    use grep_searcher::ReadSeek;

    use super::*;

    /// An in-memory [`DataSource`] backed by a byte vector, so tests don't
    /// need to touch the filesystem.
    #[derive(Clone)]
    struct MemSource {
        id: String,
        data: Vec<u8>,
    }

    impl DataSource for MemSource {
        fn identifier(&self) -> &str {
            &self.id
        }

        fn len(&self) -> io::Result<u64> {
            Ok(self.data.len() as u64)
        }

        fn open_read(&self) -> io::Result<Box<dyn ReadSeek>> {
            Ok(Box::new(Cursor::new(self.data.clone())))
        }
    }

    fn mem(id: &str, data: &[u8]) -> Box<dyn DataSource> {
        Box::new(MemSource { id: id.to_string(), data: data.to_vec() })
    }

    fn mem_owned(id: &str, data: &[u8]) -> MemSource {
        MemSource { id: id.to_string(), data: data.to_vec() }
    }

    /// Enable `log` output for whichever test calls this, so a failing
    /// run can be re-invoked with `--nocapture` to see the worker-thread
    /// trace/debug/warn lines alongside the assertion failure. Safe to
    /// call from multiple tests: only the first call actually installs
    /// the logger.
    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// A collector `EventHandler` that records every event behind a mutex,
    /// so a single test can assert on both shape and ordering after the
    /// coordinator finishes.
    #[derive(Clone, Default)]
    struct Collector(Arc<Mutex<Vec<String>>>);

    impl Collector {
        fn new() -> Collector {
            Collector::default()
        }

        fn snapshot(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }

        fn match_sources(&self) -> Vec<String> {
            self.snapshot()
                .into_iter()
                .filter(|s| s.starts_with("match:"))
                .collect()
        }
    }

    impl EventHandler for Collector {
        fn handle(&self, event: Event) {
            let label = match &event {
                Event::ProgressChanged(_) => "progress".to_string(),
                Event::MatchFound { source_id, .. } => {
                    format!("match:{source_id}")
                }
                Event::Error { source_id, .. } => format!("error:{source_id}"),
                Event::Reset => "reset".to_string(),
                Event::Completed { .. } => "completed".to_string(),
            };
            self.0.lock().unwrap().push(label);
        }
    }

    /// Build a [`SourceFactory`] that reproduces the same fixed list of
    /// in-memory sources every time `produce()` is called.
    ///
    /// `begin()` asks for a fresh iterator up to three times per run (the
    /// counter task, the parallel pass, and — if triggered — the
    /// sequential fallback), so a factory backed by a single
    /// take-once iterator would silently starve whichever caller loses
    /// the race for it; cloning the source list on every call keeps
    /// `produce()` idempotent, matching what a real directory walk would
    /// give you on a second traversal of an unchanged tree.
    fn factory(sources: Vec<MemSource>) -> impl SourceFactory + 'static {
        move || -> SourceIter {
            let sources = sources.clone();
            Box::new(
                sources
                    .into_iter()
                    .map(|s| Ok(Box::new(s) as Box<dyn DataSource>)),
            )
        }
    }

    #[test]
    fn begin_wait_reports_matches_and_completion() {
        init_logging();
        let matcher = RegexMatcher::new("needle").unwrap();
        let collector = Collector::new();
        let coordinator = SearchCoordinatorBuilder::new()
            .context_lines(1)
            .build(
                matcher,
                factory(vec![
                    mem_owned("a.txt", b"hay\nneedle\nstack\n"),
                    mem_owned("b.txt", b"nothing here\n"),
                ]),
                collector.clone(),
            )
            .unwrap();

        coordinator.begin().unwrap();
        coordinator.wait();

        let events = collector.snapshot();
        assert_eq!(collector.match_sources(), vec!["match:a.txt"]);
        assert_eq!(
            events.iter().filter(|e| *e == "completed").count(),
            1,
            "expected exactly one Completed event, got {events:?}"
        );
        assert!(!events.iter().any(|e| e == "reset"));
    }

    #[test]
    fn begin_while_running_is_invalid_state() {
        let matcher = RegexMatcher::new("x").unwrap();
        // A source that blocks until released, so the first search is
        // still `Running` when the second `begin()` is attempted.
        let release = Arc::new(Mutex::new(()));
        let guard = release.lock().unwrap();
        let release_for_source = Arc::clone(&release);

        struct BlockingSource {
            gate: Arc<Mutex<()>>,
        }
        impl DataSource for BlockingSource {
            fn identifier(&self) -> &str {
                "blocking"
            }
            fn len(&self) -> io::Result<u64> {
                Ok(1)
            }
            fn open_read(&self) -> io::Result<Box<dyn ReadSeek>> {
                let _ = self.gate.lock().unwrap();
                Ok(Box::new(Cursor::new(b"x\n".to_vec())))
            }
        }

        let source_factory = move || -> SourceIter {
            let source: Box<dyn DataSource> = Box::new(BlockingSource {
                gate: Arc::clone(&release_for_source),
            });
            Box::new(vec![Ok(source)].into_iter())
        };
        let coordinator = SearchCoordinatorBuilder::new()
            .build(matcher, source_factory, |_: Event| {})
            .unwrap();

        coordinator.begin().unwrap();
        let err = coordinator.begin().unwrap_err();
        assert!(matches!(err, SearchError::InvalidState(_)));

        drop(guard);
        coordinator.wait();
    }

    #[test]
    fn cancel_is_idempotent_and_completes_without_error() {
        let matcher = RegexMatcher::new("x").unwrap();
        let collector = Collector::new();
        let coordinator = SearchCoordinatorBuilder::new()
            .build(matcher, factory(vec![]), collector.clone())
            .unwrap();

        coordinator.begin().unwrap();
        coordinator.cancel();
        coordinator.cancel();

        let events = collector.snapshot();
        assert_eq!(
            events.iter().filter(|e| *e == "completed").count(),
            1
        );
    }

    #[test]
    fn aggregate_io_failure_triggers_reset_then_sequential_fallback() {
        init_logging();
        let matcher = RegexMatcher::new("needle").unwrap();
        let collector = Collector::new();

        // The coordinator's counter task races the parallel search pass
        // for a `produce()` call, so the factory can't tell them apart by
        // call count alone. Instead it flips to "success" mode only once
        // the fallback's own `Error("(general error)")` event has fired —
        // which happens strictly after the parallel pass's `produce()`
        // call and strictly before the sequential retry's — so both of
        // those two calls are pinned regardless of how the counter task's
        // extra, racing call interleaves.
        let retry_mode = Arc::new(AtomicBool::new(false));
        let retry_mode_for_handler = Arc::clone(&retry_mode);
        let collector_inner = collector.clone();
        let handler = move |event: Event| {
            if let Event::Error { ref source_id, .. } = event {
                if source_id == "(general error)" {
                    retry_mode_for_handler.store(true, Ordering::SeqCst);
                }
            }
            collector_inner.handle(event);
        };

        let retry_mode_for_factory = Arc::clone(&retry_mode);
        let source_factory = move || -> SourceIter {
            if retry_mode_for_factory.load(Ordering::SeqCst) {
                Box::new(
                    vec![
                        Ok(mem("a.txt", b"needle\n")),
                        Ok(mem("b.txt", b"needle again\n")),
                    ]
                    .into_iter(),
                )
            } else {
                Box::new(
                    vec![Err(io::Error::new(
                        io::ErrorKind::Other,
                        "synthetic parallel enumeration failure",
                    ))]
                    .into_iter(),
                )
            }
        };

        let coordinator = SearchCoordinatorBuilder::new()
            .build(matcher, source_factory, handler)
            .unwrap();

        coordinator.begin().unwrap();
        coordinator.wait();

        let events = collector.snapshot();
        assert_eq!(
            events.iter().filter(|e| *e == "reset").count(),
            1,
            "expected exactly one Reset event, got {events:?}"
        );
        assert_eq!(
            events.iter().filter(|e| *e == "completed").count(),
            1,
            "expected exactly one Completed after fallback, got {events:?}"
        );
        let reset_pos = events.iter().position(|e| e == "reset").unwrap();
        let completed_pos =
            events.iter().position(|e| e == "completed").unwrap();
        assert!(reset_pos < completed_pos);

        let mut matched: Vec<_> = collector.match_sources();
        matched.sort();
        assert_eq!(matched, vec!["match:a.txt", "match:b.txt"]);
    }

    #[test]
    fn invalid_max_context_length_is_rejected_synchronously() {
        let matcher = RegexMatcher::new("x").unwrap();
        let err = SearchCoordinatorBuilder::new()
            .max_context_length(0)
            .build(matcher, factory(vec![]), |_: Event| {})
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
    }

    /// End-to-end over real files on disk, rather than the in-memory
    /// `MemSource` fixture the rest of this module uses — exercises
    /// `FileDataSource`'s actual `open_read`/`len` against the filesystem.
    #[test]
    fn searches_real_files_on_disk() {
        use std::io::Write;
        use grep_searcher::FileDataSource;

        let dir = tempfile::tempdir().unwrap();
        let hit_path = dir.path().join("hit.txt");
        let mut hit = std::fs::File::create(&hit_path).unwrap();
        writeln!(hit, "before").unwrap();
        writeln!(hit, "needle here").unwrap();
        writeln!(hit, "after").unwrap();
        drop(hit);

        let miss_path = dir.path().join("miss.txt");
        std::fs::write(&miss_path, b"nothing of note\n").unwrap();

        let matcher = RegexMatcher::new("needle").unwrap();
        let collector = Collector::new();
        let paths = Arc::new(vec![hit_path, miss_path]);
        let source_factory = move || -> SourceIter {
            let paths = Arc::clone(&paths);
            Box::new((0..paths.len()).map(move |i| {
                Ok(Box::new(FileDataSource::new(&paths[i]))
                    as Box<dyn DataSource>)
            }))
        };

        let coordinator = SearchCoordinatorBuilder::new()
            .context_lines(1)
            .build(matcher, source_factory, collector.clone())
            .unwrap();

        coordinator.begin().unwrap();
        coordinator.wait();

        let matched = collector.match_sources();
        assert_eq!(matched.len(), 1);
        assert!(matched[0].ends_with("hit.txt"));
    }
}
