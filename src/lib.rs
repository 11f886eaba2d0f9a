/*!
A concurrent recursive text search engine.

Given a compiled regular expression and a lazy supply of
[`DataSource`](grep_searcher::DataSource)s, [`SearchCoordinator`] scans each
source on a pool of worker threads, emits a stream of structured
[`Event`]s (matches, progress, errors, completion), and falls back to
sequential scanning if the parallel worker pool reports an aggregate I/O
failure.

This crate is the concurrency and event-stream layer; the per-file
scanning algorithm itself — binary detection, the sliding context window,
match-record construction — lives in [`grep_searcher`], and regular
expression matching is abstracted behind [`grep_matcher::Matcher`] so a
different engine could stand in for `grep-regex`.

# Example

```no_run
use std::sync::Arc;
use grep_core::{SearchCoordinatorBuilder, Event};
use grep_regex::RegexMatcher;
use grep_searcher::{DataSource, FileDataSource};

let matcher = RegexMatcher::new(r"TODO").unwrap();
let paths = Arc::new(vec!["src/lib.rs".to_string()]);

let coordinator = SearchCoordinatorBuilder::new()
    .context_lines(2)
    .build(
        matcher,
        move || {
            let paths = Arc::clone(&paths);
            let iter = (0..paths.len()).map(move |i| {
                Ok(Box::new(FileDataSource::new(&paths[i])) as Box<dyn DataSource>)
            });
            Box::new(iter)
        },
        |event: Event| match event {
            Event::MatchFound { source_id, matches } => {
                println!("{source_id}: {} matches", matches.len());
            }
            Event::Completed { elapsed, .. } => {
                println!("done in {elapsed:?}");
            }
            _ => {}
        },
    )
    .unwrap();

coordinator.begin().unwrap();
coordinator.wait();
```
*/

#![deny(missing_docs)]

mod coordinator;
mod counters;
mod error;
mod events;

pub use crate::coordinator::{
    SearchCoordinator, SearchCoordinatorBuilder, SourceFactory, SourceIter,
};
pub use crate::counters::CounterSnapshot;
pub use crate::error::SearchError;
pub use crate::events::{Event, EventHandler};

pub use grep_searcher::{DataSource, FileDataSource, ReadSeek, SearchMatch};
