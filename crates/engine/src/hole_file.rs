//! Generator for the sparse fixture used to exercise hole preservation.
//!
//! The fixture is a file of [`FIXTURE_LEN`] bytes with [`FIXTURE_HEAD`] at
//! offset zero, [`FIXTURE_TAIL`] in its last bytes, and a single hole in
//! between. It contains no copy logic; it only relies on the filesystem
//! leaving unwritten ranges unallocated.

use std::fs::OpenOptions;
use std::io::{self, Seek, SeekFrom, Write};
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use tracing::debug;

use crate::sparse_copy::DESTINATION_MODE;

/// Bytes written at the start of the fixture.
pub const FIXTURE_HEAD: &[u8; 10] = b"abcdefghij";

/// Bytes written at the end of the fixture.
pub const FIXTURE_TAIL: &[u8; 10] = b"ABCDEFGHIJ";

/// Default fixture length: 1 GiB.
pub const FIXTURE_LEN: u64 = 1 << 30;

/// Default fixture location, relative to the working directory.
pub const FIXTURE_PATH: &str = "tmp/file.hole";

/// Smallest fixture length that holds both markers without overlap.
pub const FIXTURE_MIN_LEN: u64 = (FIXTURE_HEAD.len() + FIXTURE_TAIL.len()) as u64;

/// Rejects fixture lengths below [`FIXTURE_MIN_LEN`] with
/// [`io::ErrorKind::InvalidInput`].
pub fn check_fixture_len(len: u64) -> io::Result<()> {
    if len < FIXTURE_MIN_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("fixture length {len} is smaller than {FIXTURE_MIN_LEN} bytes"),
        ));
    }
    Ok(())
}

/// Creates (or truncates) `path` as a hole fixture of `len` bytes.
///
/// Fails with [`io::ErrorKind::InvalidInput`] when `len` cannot hold both
/// the head and tail markers without overlap.
pub fn create_hole_file(path: &Path, len: u64) -> io::Result<()> {
    check_fixture_len(len)?;

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(DESTINATION_MODE);
    let mut file = options.open(path)?;

    file.write_all(FIXTURE_HEAD)?;
    let tail_offset = len - FIXTURE_TAIL.len() as u64;
    file.seek(SeekFrom::Start(tail_offset))?;
    file.write_all(FIXTURE_TAIL)?;

    debug!(
        target: "sparse_cp::hole",
        path = %path.display(),
        len,
        "created hole fixture"
    );
    Ok(())
}
