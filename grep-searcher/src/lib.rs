/*!
Fast line oriented regex searching as a library.

This crate implements the per-file half of the search engine: given an
already-open data source, it decides whether the source looks like binary
data worth skipping, scans it line by line with a sliding window of
surrounding context, and turns each regex match into a [`SearchMatch`]
bounded to a configurable length. It does not know anything about worker
pools, progress reporting, or cancellation policy beyond the single
cooperative checkpoint `scan_source` honors — that orchestration lives one
level up, in the `grep-core` crate.
*/

#![deny(missing_docs)]

mod binary;
mod context;
mod datasource;
mod line_buffer;
mod line_reader;
mod searcher;

pub use crate::binary::{looks_binary, MimeClassifier, PREFIX_SIZE};
pub use crate::context::{ContextExtractor, SearchMatch};
pub use crate::datasource::{DataSource, FileDataSource, ReadSeek};
pub use crate::line_buffer::CircularLineBuffer;
pub use crate::line_reader::LineReader;
pub use crate::searcher::{
    scan_source, ConfigError, ScanOutcome, Searcher, SearcherBuilder,
};
