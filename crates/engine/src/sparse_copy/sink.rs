use std::fs;
use std::io::{self, Seek, Write};

/// Destination that can receive data blocks, skip over holes, and be
/// resized once the copy loop finishes.
pub trait SparseSink: Write + Seek {
    /// Sets the logical length of the destination to `len` bytes.
    fn set_len(&mut self, len: u64) -> io::Result<()>;
}

impl SparseSink for fs::File {
    fn set_len(&mut self, len: u64) -> io::Result<()> {
        fs::File::set_len(self, len)
    }
}

impl<S: SparseSink + ?Sized> SparseSink for &mut S {
    fn set_len(&mut self, len: u64) -> io::Result<()> {
        (**self).set_len(len)
    }
}
