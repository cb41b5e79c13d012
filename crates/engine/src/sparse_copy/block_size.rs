use std::fs::File;
use std::io;

/// Block size assumed on platforms that do not report `st_blksize`.
pub const DEFAULT_BLOCK_SIZE: i64 = 4096;

/// Largest block size the copier will allocate a buffer for (1 GiB).
pub const MAX_BLOCK_SIZE: i64 = 1 << 30;

/// Reports the preferred I/O block size of an open source file.
///
/// The value is returned as a signed integer so that a misbehaving source
/// (`0` or negative) can be rejected by the copier rather than silently
/// clamped.
pub trait BlockSizeProbe {
    /// Returns the preferred I/O block size of `file`.
    fn block_size_of(&self, file: &File) -> io::Result<i64>;
}

/// Probe that reads `st_blksize` from `fstat(2)` on the open handle.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatBlockSize;

impl BlockSizeProbe for StatBlockSize {
    #[cfg(unix)]
    fn block_size_of(&self, file: &File) -> io::Result<i64> {
        let stat = rustix::fs::fstat(file).map_err(io::Error::from)?;
        i64::try_from(stat.st_blksize)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "st_blksize out of range"))
    }

    #[cfg(not(unix))]
    fn block_size_of(&self, file: &File) -> io::Result<i64> {
        file.metadata()?;
        Ok(DEFAULT_BLOCK_SIZE)
    }
}

/// Probe that always reports the same size, used for `--block-size`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedBlockSize(pub i64);

impl BlockSizeProbe for FixedBlockSize {
    fn block_size_of(&self, _file: &File) -> io::Result<i64> {
        Ok(self.0)
    }
}

impl<P: BlockSizeProbe + ?Sized> BlockSizeProbe for &P {
    fn block_size_of(&self, file: &File) -> io::Result<i64> {
        (**self).block_size_of(file)
    }
}
