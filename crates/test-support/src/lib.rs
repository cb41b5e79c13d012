//! Shared test utilities for the sparse-cp workspace.
//!
//! Provides a scratch directory wrapper, writers for sparse fixtures, and
//! helpers to inspect the allocation and contents of large files without
//! loading them into memory.

use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Chunk size used when streaming file contents for comparison.
const COMPARE_CHUNK: usize = 1 << 20;

/// Temporary directory removed when dropped.
#[derive(Debug)]
pub struct TestDir {
    inner: TempDir,
}

impl TestDir {
    /// Creates a fresh scratch directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            inner: tempfile::tempdir()?,
        })
    }

    /// Returns the directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Joins `name` onto the directory path.
    #[must_use]
    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.inner.path().join(name)
    }

    /// Writes `contents` to `name` inside the directory.
    pub fn write_file(&self, name: impl AsRef<Path>, contents: &[u8]) -> io::Result<PathBuf> {
        let path = self.join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Reads `name` from the directory.
    pub fn read_file(&self, name: impl AsRef<Path>) -> io::Result<Vec<u8>> {
        fs::read(self.join(name))
    }

    /// Reports whether `name` exists inside the directory.
    #[must_use]
    pub fn exists(&self, name: impl AsRef<Path>) -> bool {
        self.join(name).exists()
    }
}

/// Creates `path` with logical length `len` and `segments` written at their
/// offsets; everything else is left as holes.
pub fn write_sparse_file(path: &Path, len: u64, segments: &[(u64, &[u8])]) -> io::Result<()> {
    let mut file = File::create(path)?;
    for (offset, bytes) in segments {
        file.seek(SeekFrom::Start(*offset))?;
        file.write_all(bytes)?;
    }
    file.set_len(len)?;
    file.sync_all()
}

/// Returns the bytes allocated on disk for `path`, or `None` when the
/// platform does not expose allocation counts.
pub fn allocated_bytes(path: &Path) -> io::Result<Option<u64>> {
    let metadata = fs::metadata(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        Ok(Some(metadata.blocks() * 512))
    }
    #[cfg(not(unix))]
    {
        let _ = metadata;
        Ok(None)
    }
}

/// Reports whether files created in `dir` can contain holes that show up in
/// their allocation counts.
pub fn filesystem_reports_holes(dir: &Path) -> io::Result<bool> {
    const PROBE_LEN: u64 = 8 * 1024 * 1024;

    let probe = dir.join(".hole-probe");
    write_sparse_file(&probe, PROBE_LEN, &[])?;
    let allocated = allocated_bytes(&probe)?;
    fs::remove_file(&probe)?;
    Ok(matches!(allocated, Some(bytes) if bytes < PROBE_LEN))
}

/// Reads `len` bytes starting at `offset`.
pub fn read_range(path: &Path, offset: u64, len: usize) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(offset))?;
    let mut buffer = vec![0u8; len];
    file.read_exact(&mut buffer)?;
    Ok(buffer)
}

/// Compares two files chunk by chunk and returns the first differing offset.
pub fn first_difference(left: &Path, right: &Path) -> io::Result<Option<u64>> {
    let mut left = File::open(left)?;
    let mut right = File::open(right)?;
    let mut left_buf = vec![0u8; COMPARE_CHUNK];
    let mut right_buf = vec![0u8; COMPARE_CHUNK];
    let mut offset = 0u64;

    loop {
        let left_len = read_full(&mut left, &mut left_buf)?;
        let right_len = read_full(&mut right, &mut right_buf)?;
        let common = left_len.min(right_len);
        if let Some(index) = left_buf[..common]
            .iter()
            .zip(&right_buf[..common])
            .position(|(a, b)| a != b)
        {
            return Ok(Some(offset + index as u64));
        }
        if left_len != right_len {
            return Ok(Some(offset + common as u64));
        }
        if left_len == 0 {
            return Ok(None);
        }
        offset += left_len as u64;
    }
}

/// Returns the offset of the first non-zero byte outside `allowed`
/// (`(offset, len)` ranges), or `None` if there is none.
pub fn first_nonzero_outside(path: &Path, allowed: &[(u64, u64)]) -> io::Result<Option<u64>> {
    let mut file = File::open(path)?;
    let mut buffer = vec![0u8; COMPARE_CHUNK];
    let mut offset = 0u64;

    loop {
        let len = read_full(&mut file, &mut buffer)?;
        if len == 0 {
            return Ok(None);
        }
        for (index, byte) in buffer[..len].iter().enumerate() {
            if *byte == 0 {
                continue;
            }
            let position = offset + index as u64;
            let permitted = allowed
                .iter()
                .any(|(start, span)| position >= *start && position < start + span);
            if !permitted {
                return Ok(Some(position));
            }
        }
        offset += len as u64;
    }
}

fn read_full(reader: &mut impl Read, buffer: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(read) => filled += read,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return Err(error),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_write_and_read() {
        let dir = TestDir::new().expect("test dir");
        dir.write_file("a.bin", b"hello").expect("write");
        assert!(dir.exists("a.bin"));
        assert_eq!(dir.read_file("a.bin").expect("read"), b"hello");
    }

    #[test]
    fn sparse_file_has_requested_layout() {
        let dir = TestDir::new().expect("test dir");
        let path = dir.join("sparse.bin");
        write_sparse_file(&path, 1000, &[(0, &b"ab"[..]), (990, &b"yz"[..])]).expect("write");

        assert_eq!(fs::metadata(&path).expect("metadata").len(), 1000);
        assert_eq!(read_range(&path, 990, 2).expect("range"), b"yz");
        assert_eq!(
            first_nonzero_outside(&path, &[(0, 2), (990, 2)]).expect("scan"),
            None
        );
        assert_eq!(first_nonzero_outside(&path, &[(0, 2)]).expect("scan"), Some(990));
    }

    #[test]
    fn first_difference_detects_length_and_content() {
        let dir = TestDir::new().expect("test dir");
        let a = dir.write_file("a", b"abcdef").expect("a");
        let b = dir.write_file("b", b"abcXef").expect("b");
        let c = dir.write_file("c", b"abc").expect("c");

        assert_eq!(first_difference(&a, &a).expect("same"), None);
        assert_eq!(first_difference(&a, &b).expect("content"), Some(3));
        assert_eq!(first_difference(&a, &c).expect("length"), Some(3));
    }
}
