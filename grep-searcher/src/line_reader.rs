use std::io::{self, Read};
use std::rc::Rc;

/// Reads an entire stream and splits it into lines, auto-detecting a
/// leading byte-order mark to choose between UTF-8, UTF-16LE, and
/// UTF-16BE, and otherwise assuming UTF-8.
///
/// Line terminators recognized are LF, CRLF, and a bare CR — whichever
/// appears first wins for that line; terminators are never included in
/// the returned lines.
///
/// This decodes the whole stream up front rather than incrementally,
/// which is a deliberate simplification: incremental UTF-16 decoding
/// across arbitrary read boundaries adds real complexity for little
/// benefit here, since the scanner has already rejected anything over
/// `MaxFileSize` before this reader is ever constructed. The sliding
/// context window — not this reader — is what keeps *scanning* memory
/// bounded.
pub struct LineReader {
    text: Rc<str>,
    pos: usize,
}

impl LineReader {
    /// Read all of `read_from` and prepare it for line-oriented iteration.
    pub fn new<R: Read>(mut read_from: R) -> io::Result<LineReader> {
        let mut raw = Vec::new();
        read_from.read_to_end(&mut raw)?;
        let text = decode(&raw);
        Ok(LineReader { text: Rc::from(text), pos: 0 })
    }

    /// Read the next line, with its terminator stripped, or `None` at
    /// end-of-stream.
    pub fn read_line(&mut self) -> Option<String> {
        if self.pos >= self.text.len() {
            return None;
        }
        let rest = &self.text[self.pos..];
        let (line, consumed) = split_first_line(rest);
        self.pos += consumed;
        Some(line.to_string())
    }
}

/// Decode `raw` to a `String`, stripping and interpreting a leading BOM
/// if present, and otherwise assuming UTF-8.
fn decode(raw: &[u8]) -> String {
    if raw.starts_with(&[0xEF, 0xBB, 0xBF]) {
        String::from_utf8_lossy(&raw[3..]).into_owned()
    } else if raw.starts_with(&[0xFF, 0xFE]) {
        let (text, _, _) = encoding_rs::UTF_16LE.decode(&raw[2..]);
        text.into_owned()
    } else if raw.starts_with(&[0xFE, 0xFF]) {
        let (text, _, _) = encoding_rs::UTF_16BE.decode(&raw[2..]);
        text.into_owned()
    } else {
        String::from_utf8_lossy(raw).into_owned()
    }
}

/// Split `s` at its first line terminator (LF, CRLF, or CR), returning
/// the line (without the terminator) and the number of bytes consumed
/// including the terminator.
fn split_first_line(s: &str) -> (&str, usize) {
    let bytes = s.as_bytes();
    match memchr::memchr2(b'\n', b'\r', bytes) {
        None => (s, s.len()),
        Some(i) if bytes[i] == b'\n' => (&s[..i], i + 1),
        Some(i) if i + 1 < bytes.len() && bytes[i + 1] == b'\n' => {
            (&s[..i], i + 2)
        }
        Some(i) => (&s[..i], i + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_of(input: &[u8]) -> Vec<String> {
        let mut reader = LineReader::new(input).unwrap();
        let mut out = Vec::new();
        while let Some(line) = reader.read_line() {
            out.push(line);
        }
        out
    }

    #[test]
    fn splits_on_lf() {
        assert_eq!(lines_of(b"alpha\nbeta\ngamma\n"), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn splits_on_crlf() {
        assert_eq!(lines_of(b"alpha\r\nbeta\r\n"), vec!["alpha", "beta"]);
    }

    #[test]
    fn splits_on_bare_cr() {
        assert_eq!(lines_of(b"alpha\rbeta\r"), vec!["alpha", "beta"]);
    }

    #[test]
    fn last_line_without_terminator_is_kept() {
        assert_eq!(lines_of(b"alpha\nbeta"), vec!["alpha", "beta"]);
    }

    #[test]
    fn strips_utf8_bom() {
        let mut raw = vec![0xEF, 0xBB, 0xBF];
        raw.extend_from_slice(b"hello\n");
        assert_eq!(lines_of(&raw), vec!["hello"]);
    }

    #[test]
    fn decodes_utf16_le_bom() {
        let mut raw = vec![0xFF, 0xFE];
        for ch in "hi\n".encode_utf16() {
            raw.extend_from_slice(&ch.to_le_bytes());
        }
        assert_eq!(lines_of(&raw), vec!["hi"]);
    }

    #[test]
    fn empty_stream_yields_no_lines() {
        assert!(lines_of(b"").is_empty());
    }
}
