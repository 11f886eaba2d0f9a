use std::fs::{self, File};
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};

/// A readable, seekable byte stream, type-erased so a [`DataSource`] doesn't
/// need to name a concrete reader type.
///
/// Any `Read + Seek` implementation gets this for free; there's nothing to
/// implement by hand.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// An opaque producer of a readable byte stream with a known length and a
/// stable identifier, typically (but not necessarily) a file path.
///
/// The searcher opens a given source exactly once, reads it sequentially
/// after a single rewind, and closes it on every exit path — callers don't
/// need `DataSource` itself to be reusable across scans, only constructible
/// ahead of time by whatever upstream enumeration produced it (directory
/// walking, a glob match, a synthetic test fixture).
pub trait DataSource: Send {
    /// A stable string identifying this source, unique within a single
    /// search. Used as the key in `MatchFound` and `Error` events.
    fn identifier(&self) -> &str;

    /// The source's length in bytes, without opening it for reading.
    fn len(&self) -> io::Result<u64>;

    /// Open the source for reading, positioned at its start.
    fn open_read(&self) -> io::Result<Box<dyn ReadSeek>>;
}

/// A [`DataSource`] backed by a path on the local filesystem.
///
/// This is the data source every real caller of this engine will actually
/// use; it exists in this crate (rather than only as a test fixture)
/// because a searcher without at least one concrete, file-backed
/// `DataSource` impl would be untestable end-to-end.
#[derive(Clone, Debug)]
pub struct FileDataSource {
    path: PathBuf,
    id: String,
}

impl FileDataSource {
    /// Create a data source for the file at `path`.
    ///
    /// The identifier is the path's lossy string representation, so a
    /// non-UTF-8 path is still usable — it just won't round-trip exactly
    /// through the identifier string.
    pub fn new<P: AsRef<Path>>(path: P) -> FileDataSource {
        let path = path.as_ref().to_path_buf();
        let id = path.to_string_lossy().into_owned();
        FileDataSource { path, id }
    }

    /// The path backing this data source.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for FileDataSource {
    fn identifier(&self) -> &str {
        &self.id
    }

    fn len(&self) -> io::Result<u64> {
        Ok(fs::metadata(&self.path)?.len())
    }

    fn open_read(&self) -> io::Result<Box<dyn ReadSeek>> {
        Ok(Box::new(File::open(&self.path)?))
    }
}
