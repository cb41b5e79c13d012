//! Sparse-preserving copy of a single regular file.
//!
//! The source is scanned block by block. Blocks that contain at least one
//! non-zero byte are written verbatim; all-zero blocks are skipped by seeking
//! the destination forward, leaving a hole where the filesystem supports one.

mod block_size;
mod classify;
mod copier;
mod destination;
mod error;
mod options;
mod sink;
mod summary;


pub use block_size::{
    BlockSizeProbe, DEFAULT_BLOCK_SIZE, FixedBlockSize, MAX_BLOCK_SIZE, StatBlockSize,
};
pub use classify::{BlockClass, classify_block};
pub use copier::{SparseCopier, copy_blocks};
pub use destination::{DESTINATION_MODE, open_destination};
pub use error::{FILE_IO_EXIT_CODE, FILE_SELECT_EXIT_CODE, SparseCopyError, SparseCopyErrorKind};
pub use options::CopyOptions;
pub use sink::SparseSink;
pub use summary::CopySummary;
