use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Exit code reported when the source or destination cannot be selected
/// (open, stat, or block-size validation failures).
pub const FILE_SELECT_EXIT_CODE: i32 = 3;

/// Exit code reported for I/O failures once the copy loop is running.
pub const FILE_IO_EXIT_CODE: i32 = 11;

/// Error produced when a sparse copy fails.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct SparseCopyError {
    kind: SparseCopyErrorKind,
}

impl SparseCopyError {
    fn new(kind: SparseCopyErrorKind) -> Self {
        Self { kind }
    }

    pub(crate) fn source_open(path: &Path, source: io::Error) -> Self {
        Self::new(SparseCopyErrorKind::SourceOpen {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn stat(path: &Path, source: io::Error) -> Self {
        Self::new(SparseCopyErrorKind::Stat {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn destination_open(path: &Path, source: io::Error) -> Self {
        Self::new(SparseCopyErrorKind::DestinationOpen {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn read(path: &Path, offset: u64, source: io::Error) -> Self {
        Self::new(SparseCopyErrorKind::Read {
            path: path.to_path_buf(),
            offset,
            source,
        })
    }

    pub(crate) fn write(path: &Path, offset: u64, source: io::Error) -> Self {
        Self::new(SparseCopyErrorKind::Write {
            path: path.to_path_buf(),
            offset,
            source,
        })
    }

    pub(crate) fn seek(path: &Path, offset: u64, source: io::Error) -> Self {
        Self::new(SparseCopyErrorKind::Seek {
            path: path.to_path_buf(),
            offset,
            source,
        })
    }

    pub(crate) fn invalid_block_size(path: &Path, reported: i64) -> Self {
        Self::new(SparseCopyErrorKind::InvalidBlockSize {
            path: path.to_path_buf(),
            reported,
        })
    }

    pub(crate) fn length_set(path: &Path, length: u64, source: io::Error) -> Self {
        Self::new(SparseCopyErrorKind::LengthSet {
            path: path.to_path_buf(),
            length,
            source,
        })
    }

    /// Provides access to the underlying error kind.
    #[must_use]
    pub const fn kind(&self) -> &SparseCopyErrorKind {
        &self.kind
    }

    /// Returns the path the failing operation was applied to.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.kind.path()
    }

    /// Returns the process exit code associated with the failure.
    ///
    /// Failures that prevent the copy from starting map to
    /// [`FILE_SELECT_EXIT_CODE`]; failures inside the copy loop map to
    /// [`FILE_IO_EXIT_CODE`].
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self.kind {
            SparseCopyErrorKind::SourceOpen { .. }
            | SparseCopyErrorKind::Stat { .. }
            | SparseCopyErrorKind::DestinationOpen { .. }
            | SparseCopyErrorKind::InvalidBlockSize { .. } => FILE_SELECT_EXIT_CODE,
            SparseCopyErrorKind::Read { .. }
            | SparseCopyErrorKind::Write { .. }
            | SparseCopyErrorKind::Seek { .. }
            | SparseCopyErrorKind::LengthSet { .. } => FILE_IO_EXIT_CODE,
        }
    }
}

/// Classification of sparse copy failures.
#[derive(Debug, Error)]
pub enum SparseCopyErrorKind {
    /// The source could not be opened for reading.
    #[error("failed to open source file '{}': {source}", path.display())]
    SourceOpen {
        /// Source path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The block-size probe failed.
    #[error("failed to query block size of '{}': {source}", path.display())]
    Stat {
        /// Path that was probed.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The destination could not be opened or created.
    #[error("failed to open destination file '{}': {source}", path.display())]
    DestinationOpen {
        /// Destination path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// Reading a block from the source failed.
    #[error("failed to read '{}' at offset {offset}: {source}", path.display())]
    Read {
        /// Source path.
        path: PathBuf,
        /// Offset of the block being read.
        offset: u64,
        /// Underlying error.
        source: io::Error,
    },
    /// Writing a data block failed or was short.
    #[error("failed to write '{}' at offset {offset}: {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Offset of the block being written.
        offset: u64,
        /// Underlying error.
        source: io::Error,
    },
    /// Advancing the destination position over a zero block failed.
    #[error("failed to seek '{}' to offset {offset}: {source}", path.display())]
    Seek {
        /// Destination path.
        path: PathBuf,
        /// Target offset of the seek.
        offset: u64,
        /// Underlying error.
        source: io::Error,
    },
    /// The block size was zero or negative.
    #[error("invalid block size {reported} for '{}'", path.display())]
    InvalidBlockSize {
        /// Path the block size was requested for.
        path: PathBuf,
        /// Block size reported by the probe or supplied by the caller.
        reported: i64,
    },
    /// Extending the destination over a trailing hole failed.
    #[error("failed to set length of '{}' to {length} bytes: {source}", path.display())]
    LengthSet {
        /// Destination path.
        path: PathBuf,
        /// Requested length.
        length: u64,
        /// Underlying error.
        source: io::Error,
    },
}

impl SparseCopyErrorKind {
    /// Returns the path involved in the failure.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::SourceOpen { path, .. }
            | Self::Stat { path, .. }
            | Self::DestinationOpen { path, .. }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Seek { path, .. }
            | Self::InvalidBlockSize { path, .. }
            | Self::LengthSet { path, .. } => path,
        }
    }

    /// Returns the underlying I/O error, if the failure carried one.
    #[must_use]
    pub const fn as_io(&self) -> Option<&io::Error> {
        match self {
            Self::SourceOpen { source, .. }
            | Self::Stat { source, .. }
            | Self::DestinationOpen { source, .. }
            | Self::Read { source, .. }
            | Self::Write { source, .. }
            | Self::Seek { source, .. }
            | Self::LengthSet { source, .. } => Some(source),
            Self::InvalidBlockSize { .. } => None,
        }
    }
}
