use crate::line_buffer::CircularLineBuffer;

/// A single match found while scanning a data source, together with the
/// surrounding context needed to display it.
///
/// `context` holds a single line (the line the match occurred on),
/// possibly truncated so its length never exceeds the configured
/// `max_context_length` — except when the match itself is longer than
/// that bound, in which case `context` is exactly the matched text and
/// nothing else fits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchMatch {
    /// The 1-based line number the match occurred on.
    pub line_number: u64,
    /// The (possibly truncated) line of text the match occurred on.
    pub context: String,
    /// The byte offset of the match within `context`.
    pub match_index: usize,
    /// The byte length of the match.
    pub match_length: usize,
    /// Whole lines immediately preceding the match, oldest first.
    pub pre_context: Vec<String>,
    /// Whole lines immediately following the match, in order.
    pub post_context: Vec<String>,
}

/// Builds [`SearchMatch`] records from a matched line, its match span, and
/// the sliding window of surrounding lines held in a
/// [`CircularLineBuffer`].
#[derive(Clone, Copy, Debug)]
pub struct ContextExtractor {
    context_lines: usize,
    max_context_length: usize,
}

impl ContextExtractor {
    /// Create a new extractor configured with `context_lines` lines of
    /// context on each side of a match and a `max_context_length` bound
    /// on the length of the single-line `context` string.
    pub fn new(
        context_lines: usize,
        max_context_length: usize,
    ) -> ContextExtractor {
        ContextExtractor { context_lines, max_context_length }
    }

    /// Build a [`SearchMatch`] for a match at byte range
    /// `[match_index, match_index + match_length)` within `line`, which
    /// sits at `line_number` (1-based) in the middle slot of `window`.
    pub fn extract(
        &self,
        line: &str,
        match_index: usize,
        match_length: usize,
        line_number: u64,
        window: &CircularLineBuffer<String>,
    ) -> SearchMatch {
        let (context, adjusted_index) =
            self.windowed_context(line, match_index, match_length);
        let pre_context = self.collect_side(window, 0, self.context_lines);
        let post_context = self.collect_side(
            window,
            self.context_lines + 1,
            window.capacity(),
        );
        SearchMatch {
            line_number,
            context,
            match_index: adjusted_index,
            match_length,
            pre_context,
            post_context,
        }
    }

    /// Compute the bounded-length context string and the match's adjusted
    /// offset within it, per the symmetric-expansion algorithm.
    fn windowed_context(
        &self,
        line: &str,
        match_index: usize,
        match_length: usize,
    ) -> (String, usize) {
        if match_length >= self.max_context_length {
            // `match_index`/`match_length` come from a `Matcher` impl
            // operating on the line's raw bytes (`regex::bytes::Regex`
            // permits byte-level patterns), so the span isn't guaranteed to
            // land on a char boundary even though `line` itself is valid
            // UTF-8. Widen to the nearest enclosing boundaries rather than
            // slicing the raw offsets directly.
            let start = floor_char_boundary(line, match_index);
            let end = ceil_char_boundary(line, match_index + match_length);
            return (line[start..end].to_string(), match_index - start);
        }

        let mut remaining = self.max_context_length - match_length;
        let mut start = match_index;
        let mut end = match_index + match_length;
        let line_len = line.len();

        let grow_end = remaining / 2;
        let new_end = clamp_char_boundary(line, end + grow_end, line_len);
        remaining -= new_end - end;
        end = new_end;

        let grow_start = remaining;
        let new_start = clamp_char_boundary_back(line, start, grow_start);
        remaining -= start - new_start;
        start = new_start;

        if remaining > 0 {
            let new_end = clamp_char_boundary(line, end + remaining, line_len);
            end = new_end;
        }

        if start == 0 && end == line_len {
            (line.to_string(), match_index)
        } else {
            (line[start..end].to_string(), match_index - start)
        }
    }

    /// Collect the non-null, length-truncated lines from `window` at
    /// logical indices `[from, to)`.
    fn collect_side(
        &self,
        window: &CircularLineBuffer<String>,
        from: usize,
        to: usize,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        for i in from..to.min(window.len()) {
            if let Some(line) = window.get(i) {
                lines.push(truncate(line, self.max_context_length));
            }
        }
        lines
    }
}

fn truncate(line: &str, max_len: usize) -> String {
    if line.len() <= max_len {
        line.to_string()
    } else {
        let boundary = clamp_char_boundary(line, max_len, line.len());
        line[..boundary].to_string()
    }
}

/// Find the largest char boundary `<= wanted`, clamped to `[0, limit]`.
fn clamp_char_boundary(s: &str, wanted: usize, limit: usize) -> usize {
    let mut pos = wanted.min(limit);
    while pos > 0 && !s.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Find the smallest char boundary `>= start - wanted`, clamped to `>= 0`.
fn clamp_char_boundary_back(s: &str, start: usize, wanted: usize) -> usize {
    let mut pos = start.saturating_sub(wanted);
    while pos < start && !s.is_char_boundary(pos) {
        pos += 1;
    }
    pos
}

/// Find the largest char boundary `<= idx` (clamped to `s.len()`).
///
/// Unlike `clamp_char_boundary`, this has no separate `limit` parameter —
/// it's used to widen a byte-level match's own start index outward to a
/// safe boundary, not to shrink a context window inward.
fn floor_char_boundary(s: &str, idx: usize) -> usize {
    let mut pos = idx.min(s.len());
    while pos > 0 && !s.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Find the smallest char boundary `>= idx` (clamped to `s.len()`).
fn ceil_char_boundary(s: &str, idx: usize) -> usize {
    let mut pos = idx.min(s.len());
    while pos < s.len() && !s.is_char_boundary(pos) {
        pos += 1;
    }
    pos
}
