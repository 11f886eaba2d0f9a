use std::sync::Mutex;

/// The number of leading bytes of a file sniffed to guess whether it is
/// binary.
pub const PREFIX_SIZE: usize = 4096;

/// Above this many NUL bytes, combined with at least one run of two
/// consecutive NULs, a prefix is assumed binary without consulting the
/// MIME classifier.
const NUL_COUNT_THRESHOLD: usize = 2;

// The underlying MIME matcher library builds its table of format
// signatures the first time it's constructed, which isn't guaranteed to
// be safe to do from more than one thread at once. We don't actually know
// whether today's `infer` release needs this (it doesn't, currently), but
// the searcher treats classifier construction as if it might, since a
// future classifier swapped in behind this same interface could.
static CLASSIFIER_INIT_LOCK: Mutex<()> = Mutex::new(());

/// A per-worker handle to the MIME-type classifier used as the slow path
/// of the binary-file heuristic.
///
/// Constructing a `MimeClassifier` is serialized process-wide (see
/// [`MimeClassifier::new`]); using one, once built, requires no
/// synchronization. Each worker thread in the search coordinator builds
/// exactly one of these on first use and holds onto it for the rest of
/// its assigned work, dropping it when the worker exits.
pub struct MimeClassifier {
    inner: infer::Infer,
}

impl MimeClassifier {
    /// Construct a new classifier handle.
    ///
    /// This acquires a process-wide lock for the duration of
    /// construction, then releases it — the returned handle itself is not
    /// shared and needs no further locking.
    pub fn new() -> MimeClassifier {
        let _guard = CLASSIFIER_INIT_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        MimeClassifier { inner: infer::Infer::new() }
    }

    /// Classify `prefix`, returning the MIME type string the underlying
    /// library recognizes it as, or `None` if it isn't recognized as any
    /// known (binary) format.
    fn mime_type(&self, prefix: &[u8]) -> Option<String> {
        self.inner.get(prefix).map(|kind| kind.mime_type().to_string())
    }
}

impl Default for MimeClassifier {
    fn default() -> MimeClassifier {
        MimeClassifier::new()
    }
}

/// Returns true if `prefix` (the first up-to-[`PREFIX_SIZE`] bytes of a
/// file) looks like binary data.
///
/// This runs a cheap NUL-run heuristic first: two consecutive NUL bytes
/// together with more than two NULs total in the prefix is a strong
/// enough signal on its own, and lets most executables, archives, and
/// other encoded formats skip the classifier call entirely. Everything
/// else falls through to `classifier`, which is treated as binary unless
/// it reports a `text/*` MIME type (or can't classify the prefix at all,
/// which is the common case for plain text).
pub fn looks_binary(prefix: &[u8], classifier: &MimeClassifier) -> bool {
    if has_nul_run(prefix) {
        return true;
    }
    match classifier.mime_type(prefix) {
        Some(mime) => !mime.starts_with("text/"),
        None => false,
    }
}

fn has_nul_run(prefix: &[u8]) -> bool {
    let nul_count = bytecount::count(prefix, 0);
    if nul_count <= NUL_COUNT_THRESHOLD {
        return false;
    }
    prefix.windows(2).any(|w| w == [0, 0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prefix_is_not_binary() {
        let classifier = MimeClassifier::new();
        assert!(!looks_binary(&[], &classifier));
    }

    #[test]
    fn nul_run_triggers_fast_path() {
        let classifier = MimeClassifier::new();
        let mut prefix = vec![0u8, 0u8, b'A', b'B'];
        prefix.extend_from_slice(&[0u8, 0u8, 0u8]);
        assert!(looks_binary(&prefix, &classifier));
    }

    #[test]
    fn sparse_nuls_do_not_trigger_fast_path() {
        let classifier = MimeClassifier::new();
        // Only two NULs, no consecutive run: the fast path must not fire,
        // so this should fall through to the classifier and come back
        // non-binary for ordinary text.
        let mut prefix = b"hello\x00world\x00!".to_vec();
        prefix.extend_from_slice(b" more text so the buffer looks textual");
        assert!(!looks_binary(&prefix, &classifier));
    }

    #[test]
    fn plain_text_is_not_binary() {
        let classifier = MimeClassifier::new();
        assert!(!looks_binary(b"the quick brown fox\n", &classifier));
    }

    #[test]
    fn png_signature_is_binary() {
        let classifier = MimeClassifier::new();
        let png_sig = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
        assert!(looks_binary(&png_sig, &classifier));
    }
}
