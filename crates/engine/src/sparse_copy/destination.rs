use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// Permission bits applied when the destination is created: `rw-r--r--`.
pub const DESTINATION_MODE: u32 = 0o644;

/// Opens `path` for writing, creating it with [`DESTINATION_MODE`] if absent.
///
/// Existing files keep their contents unless `truncate` is set; writes are
/// positioned by the copy cursor, never appended.
pub fn open_destination(path: &Path, truncate: bool) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(truncate);
    #[cfg(unix)]
    options.mode(DESTINATION_MODE);
    options.open(path)
}
