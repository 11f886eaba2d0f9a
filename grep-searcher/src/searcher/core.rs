use std::io::{self, Read, Seek, SeekFrom};

use grep_matcher::Matcher;

use crate::binary::{self, MimeClassifier, PREFIX_SIZE};
use crate::context::{ContextExtractor, SearchMatch};
use crate::line_buffer::CircularLineBuffer;
use crate::line_reader::LineReader;
use crate::searcher::Searcher;

/// The result of scanning a single data source.
#[derive(Debug)]
pub enum ScanOutcome {
    /// The source was scanned to completion. The list of matches found
    /// may be empty.
    Scanned(Vec<SearchMatch>),
    /// The source was silently skipped: it was empty, or its length
    /// exceeded the searcher's configured maximum file size. Only the
    /// `done` counter should move for this outcome; no events are
    /// warranted.
    SilentlySkipped,
    /// The source was skipped because its contents looked binary.
    BinarySkipped,
    /// Scanning was abandoned because cancellation was observed. Neither
    /// `done` nor `skipped` should move for this outcome.
    Cancelled,
}

/// Scan a single already-open data source for matches against `matcher`.
///
/// `len` is the source's known length, used for the size gate. `pool` is
/// a reusable byte buffer for the prefix sniff, handed back to the caller
/// so it can be reused across files by the same worker. `is_cancelled` is
/// polled before the binary sniff and once per line read, matching the
/// cancellation boundaries in the component design.
pub fn scan_source<R, M>(
    source: &mut R,
    len: u64,
    searcher: &Searcher,
    matcher: &M,
    classifier: &MimeClassifier,
    pool: &mut Vec<u8>,
    is_cancelled: &dyn Fn() -> bool,
) -> io::Result<ScanOutcome>
where
    R: Read + Seek + ?Sized,
    M: Matcher,
{
    if len == 0 || len > searcher.max_file_size() {
        return Ok(ScanOutcome::SilentlySkipped);
    }
    if is_cancelled() {
        return Ok(ScanOutcome::Cancelled);
    }

    if searcher.skip_binary_files() {
        let want = PREFIX_SIZE.min(len as usize);
        pool.clear();
        pool.resize(want, 0);
        let n = read_fill(source, pool)?;
        pool.truncate(n);
        if binary::looks_binary(pool, classifier) {
            log::trace!("binary content detected, skipping source");
            return Ok(ScanOutcome::BinarySkipped);
        }
    }

    source.seek(SeekFrom::Start(0))?;
    let mut reader = LineReader::new(&mut *source)?;

    let context_lines = searcher.context_lines();
    let capacity = 2 * context_lines + 1;
    let extractor =
        ContextExtractor::new(context_lines, searcher.max_context_length());
    let mut window: CircularLineBuffer<String> =
        CircularLineBuffer::new(capacity);
    for _ in 0..context_lines {
        window.push_back(None);
    }

    // Prime the window with up to `context_lines + 1` lines: the first
    // one primed becomes the initial "current" line, the rest fill the
    // post-context slots ahead of it.
    let mut primed = 0u64;
    for _ in 0..context_lines + 1 {
        match reader.read_line() {
            Some(line) => {
                primed += 1;
                window.push_back(Some(line));
            }
            None => break,
        }
    }
    while window.len() < capacity {
        window.push_back(None);
    }

    let mut matches = Vec::new();
    let mut current_line_number: u64 = 1;
    loop {
        if is_cancelled() {
            return Ok(ScanOutcome::Cancelled);
        }
        if primed == 0 {
            break;
        }
        let current = window.get(context_lines).clone();
        let current = match current {
            Some(line) => line,
            None => break,
        };

        let found = matcher.find_iter(current.as_bytes()).map_err(|err| {
            io::Error::new(io::ErrorKind::Other, err.to_string())
        })?;
        for m in found {
            matches.push(extractor.extract(
                &current,
                m.start(),
                m.len(),
                current_line_number,
                &window,
            ));
        }

        match reader.read_line() {
            Some(line) => window.push_back(Some(line)),
            None => window.push_back(None),
        }
        current_line_number += 1;
    }

    Ok(ScanOutcome::Scanned(matches))
}

/// Fill `buf` completely from `source`, or as much as is available before
/// EOF, returning the number of bytes actually read.
fn read_fill<R: Read + ?Sized>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match source.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}
