//! Byte sources feeding the scan buffer.
//!
//! A [`ByteSource`] is an opened stream that knows its total size and hands
//! out bytes in bounded chunks through a monotonically advancing internal
//! cursor. The buffer layer does not care whether it is talking to a file
//! or to memory.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Failure in the byte-source layer.
///
/// These are fatal to any parse in progress: the scanning layers give up
/// rather than resynchronize.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("file doesnt exist: {0}")]
    FileDoesntExist(PathBuf),
    #[error("couldnt open file: {0}")]
    CouldntOpenFile(PathBuf),
    #[error("couldnt read file")]
    CouldntReadFile,
    #[error("couldnt get file size")]
    CouldntGetFileSize,
    #[error("couldnt navigate file")]
    CouldntNavigateFile,
}

/// An opened byte stream with a known total size.
pub trait ByteSource {
    /// Total number of bytes in the stream, independent of the cursor.
    fn size(&mut self) -> Result<u64, SourceError>;

    /// Read up to `max` bytes at the cursor, advancing it.
    ///
    /// A short (possibly empty) result means the stream has ended.
    fn read_chunk(&mut self, max: usize) -> Result<Vec<u8>, SourceError>;

    /// Reposition the cursor to the first byte of the stream.
    fn rewind(&mut self) -> Result<(), SourceError>;
}

/// File-backed source.
#[derive(Debug)]
pub struct FileSource {
    file: File,
}

impl FileSource {
    /// Open `path` for reading.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        if !path.exists() {
            return Err(SourceError::FileDoesntExist(path.to_path_buf()));
        }
        let file =
            File::open(path).map_err(|_| SourceError::CouldntOpenFile(path.to_path_buf()))?;
        Ok(FileSource { file })
    }
}

impl ByteSource for FileSource {
    /// Probes by seeking to the end and back, leaving the cursor where it was.
    fn size(&mut self) -> Result<u64, SourceError> {
        let pos = self
            .file
            .stream_position()
            .map_err(|_| SourceError::CouldntNavigateFile)?;
        let size = self
            .file
            .seek(SeekFrom::End(0))
            .map_err(|_| SourceError::CouldntGetFileSize)?;
        self.file
            .seek(SeekFrom::Start(pos))
            .map_err(|_| SourceError::CouldntNavigateFile)?;
        Ok(size)
    }

    fn read_chunk(&mut self, max: usize) -> Result<Vec<u8>, SourceError> {
        let mut buf = vec![0u8; max];
        let mut filled = 0;
        while filled < max {
            match self.file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(_) => return Err(SourceError::CouldntReadFile),
            }
        }
        buf.truncate(filled);
        Ok(buf)
    }

    fn rewind(&mut self) -> Result<(), SourceError> {
        self.file
            .seek(SeekFrom::Start(0))
            .map(|_| ())
            .map_err(|_| SourceError::CouldntNavigateFile)
    }
}

/// In-memory source, used by tests and by callers that already hold the text.
pub struct MemorySource {
    data: Vec<u8>,
    cursor: usize,
}

impl MemorySource {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        MemorySource {
            data: data.into(),
            cursor: 0,
        }
    }
}

impl From<&str> for MemorySource {
    fn from(text: &str) -> Self {
        MemorySource::new(text.as_bytes().to_vec())
    }
}

impl ByteSource for MemorySource {
    fn size(&mut self) -> Result<u64, SourceError> {
        Ok(self.data.len() as u64)
    }

    fn read_chunk(&mut self, max: usize) -> Result<Vec<u8>, SourceError> {
        let end = (self.cursor + max).min(self.data.len());
        let chunk = self.data[self.cursor..end].to_vec();
        self.cursor = end;
        Ok(chunk)
    }

    fn rewind(&mut self) -> Result<(), SourceError> {
        self.cursor = 0;
        Ok(())
    }
}
